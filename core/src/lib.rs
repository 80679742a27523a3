//! tycoon-core — game-state and simulation engine for an idle/tycoon
//! business game.
//!
//! The engine is the single authority over a player's ledger: balance,
//! collectible ownership, simulated stock positions, fixed/recurring
//! deposits, and the cooldown-gated income actions on top of them. A
//! market simulator advances a bounded random walk per instrument;
//! presentation layers submit [`command::PlayerCommand`]s and read
//! derived views from [`report`]. State persists as one versioned
//! JSON blob in SQLite and fails open to a fresh save on corruption.

pub mod catalog;
pub mod clock;
pub mod command;
pub mod config;
pub mod deposit;
pub mod engine;
pub mod error;
pub mod event;
pub mod income;
pub mod ledger;
pub mod market;
pub mod report;
pub mod rng;
pub mod state;
pub mod store;
pub mod types;

//! The game engine — the aggregate root everything routes through.
//!
//! RULES:
//!   - All mutation enters via apply() or tick_market(); each call is
//!     one atomic state transition, validated fully before any field
//!     changes. No caller ever observes a half-applied transaction.
//!   - Single-threaded, run-to-completion. Under real concurrency,
//!     wrap the whole engine in one mutex (or an actor); the per-call
//!     atomicity is the property to preserve, there is no finer lock.
//!   - Every applied command persists the state blob and appends its
//!     events to the store's event log.

use crate::{
    catalog::Catalog,
    clock::GameClock,
    command::{PlayerCommand, Rejection},
    config::GameConfig,
    deposit, income,
    error::GameResult,
    event::{event_type_name, EventLogEntry, GameEvent},
    ledger,
    market::{MarketSimulator, Quote},
    rng::RngBank,
    state::{self, GameState, SCHEMA_VERSION},
    store::GameStore,
};

/// What apply() did. Rejections are values, not errors: the state is
/// untouched and the session keeps running.
#[derive(Debug)]
pub enum CommandOutcome {
    Applied(Vec<GameEvent>),
    Rejected(Rejection),
}

impl CommandOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CommandOutcome::Applied(_))
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            CommandOutcome::Rejected(r) => Some(*r),
            CommandOutcome::Applied(_) => None,
        }
    }
}

pub struct GameEngine {
    pub config: GameConfig,
    pub catalog: Catalog,
    pub clock: GameClock,
    pub state: GameState,
    market: MarketSimulator,
    store: GameStore,
}

impl GameEngine {
    /// Restore the save from the store, or start fresh when no save
    /// exists or the blob is unusable (fails open, never errors on
    /// bad data).
    pub fn load_or_new(
        store: GameStore,
        catalog: Catalog,
        config: GameConfig,
        clock: GameClock,
        seed: u64,
    ) -> GameResult<Self> {
        let state = match store.load_state()? {
            Some((version, blob)) => state::restore(version, &blob, &config),
            None => GameState::new(&config),
        };
        let bank = RngBank::new(seed);
        let market = MarketSimulator::new(&catalog, config.market.clone(), &bank);
        let mut engine = Self {
            config,
            catalog,
            clock,
            state,
            market,
            store,
        };
        engine.seed_available_shares();
        log::info!(
            "engine up: balance={:.2}, {} instruments",
            engine.state.balance,
            engine.catalog.instruments().len()
        );
        Ok(engine)
    }

    /// In-memory store, built-in catalog, manual clock, fixed seed.
    pub fn build_test(seed: u64) -> GameResult<Self> {
        let store = GameStore::in_memory()?;
        store.migrate()?;
        Self::load_or_new(
            store,
            Catalog::builtin(),
            GameConfig::default(),
            GameClock::manual(),
            seed,
        )
    }

    /// Supply is seeded init-if-absent from the catalog: an existing
    /// save keeps its remaining supply, a fresh save (or a catalog
    /// instrument this save has never seen) starts at full supply.
    fn seed_available_shares(&mut self) {
        for spec in self.catalog.instruments() {
            ledger::ensure_available_shares(&mut self.state, &spec.id, spec.total_shares);
        }
    }

    /// Apply one player command as a single atomic transition.
    pub fn apply(&mut self, command: PlayerCommand) -> GameResult<CommandOutcome> {
        let now = self.clock.now();
        let outcome = match command {
            PlayerCommand::Click => ledger::click(&mut self.state, &self.config),
            PlayerCommand::BuyCollectible { category, id } => {
                ledger::buy_collectible(&mut self.state, &self.catalog, category, id)
            }
            PlayerCommand::SellCollectible { category, id } => {
                ledger::sell_collectible(&mut self.state, &self.catalog, &self.config, category, id)
            }
            PlayerCommand::BuyStock {
                instrument_id,
                quantity,
                price,
                name,
            } => ledger::buy_stock(&mut self.state, &instrument_id, quantity, price, &name, now),
            PlayerCommand::SellStock {
                instrument_id,
                quantity,
                price,
                name,
            } => ledger::sell_stock(&mut self.state, &instrument_id, quantity, price, &name, now),
            PlayerCommand::CollectDividends => income::earn_dividends(
                &mut self.state,
                self.market.live_quotes(),
                now,
                &self.config,
            ),
            PlayerCommand::CollectInterest => {
                income::earn_interest(&mut self.state, now, &self.config)
            }
            PlayerCommand::StartFd { amount } => {
                deposit::start_fd(&mut self.state, amount, now, &self.config)
            }
            PlayerCommand::EndFd { id } => deposit::end_fd(&mut self.state, id, now, &self.config),
            PlayerCommand::EarlyWithdrawFd { id } => {
                deposit::early_withdraw_fd(&mut self.state, id, now, &self.config)
            }
            PlayerCommand::StartRd {
                initial,
                monthly,
                months,
            } => deposit::start_rd(&mut self.state, initial, monthly, months, now, &self.config),
            PlayerCommand::EarlyWithdrawRd { id } => {
                deposit::early_withdraw_rd(&mut self.state, id, now, &self.config)
            }
            PlayerCommand::ResetGame => Ok(self.reset()),
        };

        match outcome {
            Ok(events) => {
                for event in &events {
                    self.store.append_event(&EventLogEntry {
                        id: None,
                        occurred_at: now,
                        event_type: event_type_name(event).to_string(),
                        payload: serde_json::to_string(event)?,
                    })?;
                }
                self.persist()?;
                Ok(CommandOutcome::Applied(events))
            }
            Err(rejection) => {
                log::debug!("command rejected: {}", rejection.reason());
                Ok(CommandOutcome::Rejected(rejection))
            }
        }
    }

    /// Advance the price random walk one step and persist the
    /// updated history.
    pub fn tick_market(&mut self) -> GameResult<()> {
        let now = self.clock.now();
        self.market.tick(&mut self.state, now);
        self.persist()
    }

    /// Restore the pristine initial state. Supply is re-seeded from
    /// the catalog; live market prices are left running, matching a
    /// reset mid-session.
    fn reset(&mut self) -> Vec<GameEvent> {
        self.state = GameState::new(&self.config);
        self.seed_available_shares();
        log::info!("game reset to initial state");
        vec![GameEvent::GameReset]
    }

    fn persist(&self) -> GameResult<()> {
        let blob = serde_json::to_string(&self.state)?;
        self.store.save_state(SCHEMA_VERSION, &blob)
    }

    // ── Read surfaces ──────────────────────────────────────────

    /// Quotes once the feed is live; empty before the first tick.
    pub fn live_quotes(&self) -> &[Quote] {
        self.market.live_quotes()
    }

    pub fn quote(&self, instrument_id: &str) -> Option<&Quote> {
        self.market.quote(instrument_id)
    }

    pub fn store(&self) -> &GameStore {
        &self.store
    }
}

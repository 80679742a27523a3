//! The game state — the single aggregate root.
//!
//! RULE: No external direct field writes. Every mutation goes through
//! the operation modules (ledger, income, deposit, market) which the
//! engine dispatches to; each operation validates fully before it
//! commits, so no observer ever sees a half-applied transaction.
//!
//! Every field carries a serde default so that a blob persisted by an
//! older schema merges over a fresh default state on load: newly
//! added fields come up with their defaults instead of failing the
//! whole restore.

use crate::{
    catalog::ItemCategory,
    config::GameConfig,
    types::{round2, DepositId, InstrumentId, ItemId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Bump when the persisted shape changes incompatibly.
pub const SCHEMA_VERSION: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeKind {
    Buy,
    Sell,
    Dividend,
}

/// Append-only stock ledger entry. For `Dividend` records `price`
/// carries the total payout and `quantity` the holding it was paid on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub kind: TradeKind,
    pub instrument_id: InstrumentId,
    pub name: String,
    pub quantity: u64,
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IncomeKind {
    Earn,
    FdStart,
    FdEnd,
    FdEarly,
    RdStart,
    RdEnd,
    RdEarly,
}

/// Append-only stable-income ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub kind: IncomeKind,
    pub amount: f64,
    pub interest: f64,
    pub timestamp: DateTime<Utc>,
}

/// Cumulative cost record per instrument. Monotonic: never
/// decremented on sell. Average cost derived from it therefore
/// reflects every share ever bought, not the current holding — a
/// deliberate quirk carried over from the original economics (it
/// understates average cost after a partial sell followed by further
/// buys).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CostBasis {
    pub total_qty: u64,
    pub total_cost: f64,
}

impl CostBasis {
    pub fn average(&self) -> Option<f64> {
        (self.total_qty > 0).then(|| self.total_cost / self.total_qty as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedDeposit {
    pub id: DepositId,
    pub principal: f64,
    /// Fixed at creation: principal × fd_rate.
    pub interest: f64,
    pub start: DateTime<Utc>,
    pub term_months: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringDeposit {
    pub id: DepositId,
    pub monthly: f64,
    pub term_months: u32,
    pub initial: f64,
    /// initial + monthly × term_months, debited up front.
    pub contributed: f64,
    /// Fixed at creation: contributed × rd_rate.
    pub interest: f64,
    pub start: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
    pub balance: f64,

    /// Owned collectible ids per category. An id is owned or not,
    /// never quantified.
    pub owned: BTreeMap<ItemCategory, BTreeSet<ItemId>>,

    /// Shares held per instrument. Absence means zero; positions are
    /// removed when they reach zero.
    pub holdings: BTreeMap<InstrumentId, u64>,
    pub cost_basis: BTreeMap<InstrumentId, CostBasis>,
    /// Remaining sellable supply. Initialized once from the catalog
    /// (init-if-absent) and never overwritten while a save exists.
    pub available_shares: BTreeMap<InstrumentId, u64>,
    pub trade_log: Vec<TradeRecord>,

    /// Persisted price history per instrument, bounded by wall-clock
    /// age, not point count.
    pub price_history: BTreeMap<InstrumentId, Vec<PricePoint>>,

    pub income_log: Vec<IncomeRecord>,
    pub fds: Vec<FixedDeposit>,
    pub rds: Vec<RecurringDeposit>,
    pub next_deposit_id: DepositId,

    pub last_dividend_time: Option<DateTime<Utc>>,
    pub last_interest_time: Option<DateTime<Utc>>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            balance: GameConfig::default().starting_balance,
            owned: BTreeMap::new(),
            holdings: BTreeMap::new(),
            cost_basis: BTreeMap::new(),
            available_shares: BTreeMap::new(),
            trade_log: Vec::new(),
            price_history: BTreeMap::new(),
            income_log: Vec::new(),
            fds: Vec::new(),
            rds: Vec::new(),
            next_deposit_id: 1,
            last_dividend_time: None,
            last_interest_time: None,
        }
    }
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            balance: config.starting_balance,
            ..Self::default()
        }
    }

    pub fn held(&self, instrument_id: &str) -> u64 {
        self.holdings.get(instrument_id).copied().unwrap_or(0)
    }

    pub fn owns(&self, category: ItemCategory, id: ItemId) -> bool {
        self.owned
            .get(&category)
            .is_some_and(|set| set.contains(&id))
    }

    pub fn alloc_deposit_id(&mut self) -> DepositId {
        let id = self.next_deposit_id;
        self.next_deposit_id += 1;
        id
    }

    pub fn credit(&mut self, amount: f64) {
        self.balance = round2(self.balance + amount);
    }

    /// Caller has already validated `amount <= balance`.
    pub fn debit(&mut self, amount: f64) {
        debug_assert!(amount <= self.balance);
        self.balance = round2(self.balance - amount);
    }

    /// Append a price point and prune everything older than the
    /// window. Invariant on exit: all retained points satisfy
    /// `now - timestamp <= window`.
    pub fn record_price_point(
        &mut self,
        instrument_id: &str,
        price: f64,
        now: DateTime<Utc>,
        window: chrono::Duration,
    ) {
        let history = self
            .price_history
            .entry(instrument_id.to_string())
            .or_default();
        history.push(PricePoint {
            timestamp: now,
            price,
        });
        history.retain(|p| now - p.timestamp <= window);
    }
}

/// Restore a persisted blob, schema-version gated. Fails open: any
/// corrupt or future-versioned blob yields a fresh default state
/// instead of an error.
pub fn restore(version: u32, state_json: &str, config: &GameConfig) -> GameState {
    if version > SCHEMA_VERSION {
        log::warn!(
            "save has schema v{version}, engine supports v{SCHEMA_VERSION}; starting fresh"
        );
        return GameState::new(config);
    }
    match serde_json::from_str::<GameState>(state_json) {
        Ok(mut state) => {
            normalize(&mut state, config);
            state
        }
        Err(e) => {
            log::warn!("corrupt save discarded ({e}); starting fresh");
            GameState::new(config)
        }
    }
}

/// Repair numerically impossible values that a hand-edited or
/// truncated save could carry.
fn normalize(state: &mut GameState, config: &GameConfig) {
    if !state.balance.is_finite() {
        state.balance = config.starting_balance;
    }
    if state.next_deposit_id == 0 {
        state.next_deposit_id = 1;
    }
    let max_seen = state
        .fds
        .iter()
        .map(|fd| fd.id)
        .chain(state.rds.iter().map(|rd| rd.id))
        .max()
        .unwrap_or(0);
    if state.next_deposit_id <= max_seen {
        state.next_deposit_id = max_seen + 1;
    }
}

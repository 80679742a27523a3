//! Display-facing read model. Everything here is derived from the
//! authoritative state on demand and never persisted.

use crate::{
    catalog::{Catalog, ItemCategory},
    config::GameConfig,
    ledger,
    market::Quote,
    state::{GameState, IncomeKind, IncomeRecord, TradeKind},
    types::round2,
};
use std::collections::BTreeMap;

/// Fortune breakdown for the profile view.
#[derive(Debug, Clone)]
pub struct FortuneSummary {
    pub balance: f64,
    /// Owned count per category.
    pub owned_counts: BTreeMap<ItemCategory, usize>,
    /// Catalog value of everything owned.
    pub collectibles_value: f64,
    /// Market value of held shares at live prices (cost basis when
    /// no live quote exists yet).
    pub holdings_value: f64,
    /// Principal + fixed interest locked in open deposits.
    pub deposits_value: f64,
    pub stable_income_total: f64,
    pub realized_trading_pl: f64,
    pub total_fortune: f64,
}

pub fn fortune_summary(
    state: &GameState,
    catalog: &Catalog,
    quotes: &[Quote],
    _config: &GameConfig,
) -> FortuneSummary {
    let mut owned_counts = BTreeMap::new();
    let mut collectibles_value = 0.0;
    for category in ItemCategory::ALL {
        let owned = state.owned.get(&category);
        let count = owned.map_or(0, |set| set.len());
        owned_counts.insert(category, count);
        if let Some(set) = owned {
            for id in set {
                if let Some(item) = catalog.item(category, *id) {
                    collectibles_value += item.price;
                }
            }
        }
    }

    let mut holdings_value = 0.0;
    for (instrument_id, &quantity) in &state.holdings {
        let unit = quotes
            .iter()
            .find(|q| &q.id == instrument_id)
            .map(|q| q.price)
            .or_else(|| {
                state
                    .cost_basis
                    .get(instrument_id)
                    .and_then(|b| b.average())
            })
            .unwrap_or(0.0);
        holdings_value += unit * quantity as f64;
    }

    let deposits_value: f64 = state
        .fds
        .iter()
        .map(|fd| fd.principal + fd.interest)
        .chain(state.rds.iter().map(|rd| rd.contributed + rd.interest))
        .sum();

    let stable_income_total = total_stable_income(state);
    let realized_trading_pl = realized_trading_pl(state);
    let total_fortune = state.balance + collectibles_value + holdings_value + deposits_value;

    FortuneSummary {
        balance: state.balance,
        owned_counts,
        collectibles_value,
        holdings_value,
        deposits_value,
        stable_income_total,
        realized_trading_pl,
        total_fortune,
    }
}

/// Realized P/L over all sells: (sale price − cumulative average
/// cost) × quantity. Uses the monotonic cost basis, so a partial
/// sell followed by further buys understates the average cost —
/// preserved behavior, see the state module.
pub fn realized_trading_pl(state: &GameState) -> f64 {
    let profit: f64 = state
        .trade_log
        .iter()
        .filter(|r| r.kind == TradeKind::Sell)
        .map(|r| ledger::realized_on_sale(state, &r.instrument_id, r.quantity, r.price))
        .sum();
    round2(profit)
}

/// Realized P/L plus dividend payouts — the trading-screen total.
pub fn total_trading_pl(state: &GameState) -> f64 {
    let dividends: f64 = state
        .trade_log
        .iter()
        .filter(|r| r.kind == TradeKind::Dividend)
        .map(|r| r.price)
        .sum();
    round2(realized_trading_pl(state) + dividends)
}

/// Sum of all interest across the stable-income log.
pub fn total_stable_income(state: &GameState) -> f64 {
    round2(state.income_log.iter().map(|r| r.interest).sum())
}

/// The profile variant: only collected interest and completed
/// deposits count as earned.
pub fn settled_stable_income(state: &GameState) -> f64 {
    round2(
        state
            .income_log
            .iter()
            .filter(|r| matches!(r.kind, IncomeKind::Earn | IncomeKind::FdEnd | IncomeKind::RdEnd))
            .map(|r| r.interest)
            .sum(),
    )
}

/// Stable-income log filter tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeFilter {
    All,
    Interest,
    Fd,
    Rd,
}

pub fn filtered_income<'a>(
    state: &'a GameState,
    filter: IncomeFilter,
) -> impl Iterator<Item = &'a IncomeRecord> {
    state.income_log.iter().filter(move |r| match filter {
        IncomeFilter::All => true,
        IncomeFilter::Interest => r.kind == IncomeKind::Earn,
        IncomeFilter::Fd => {
            matches!(r.kind, IncomeKind::FdStart | IncomeKind::FdEnd | IncomeKind::FdEarly)
        }
        IncomeFilter::Rd => {
            matches!(r.kind, IncomeKind::RdStart | IncomeKind::RdEnd | IncomeKind::RdEarly)
        }
    })
}

/// Compact money formatting for headline numbers: T/B/M suffixes
/// above a million, plain otherwise.
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e12 {
        format!("{:.1} T", value / 1e12)
    } else if abs >= 1e9 {
        format!("{:.1} B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1} M", value / 1e6)
    } else {
        format!("{value:.2}")
    }
}

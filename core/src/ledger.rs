//! Collectible and stock operations.
//!
//! Every operation validates its preconditions completely before
//! touching the state, then commits balance and holdings in the same
//! call: there are no partial effects. A failed precondition returns
//! a [`Rejection`] and leaves the state byte-identical.

use crate::{
    catalog::{Catalog, ItemCategory},
    command::Rejection,
    config::GameConfig,
    event::GameEvent,
    state::{CostBasis, GameState, TradeKind, TradeRecord},
    types::{ItemId, round2},
};
use chrono::{DateTime, Utc};

type OpResult = Result<Vec<GameEvent>, Rejection>;

/// Manual clicker income. Never rejected.
pub fn click(state: &mut GameState, config: &GameConfig) -> OpResult {
    state.credit(config.earning_per_click);
    Ok(vec![GameEvent::BalanceClicked {
        amount: config.earning_per_click,
    }])
}

pub fn buy_collectible(
    state: &mut GameState,
    catalog: &Catalog,
    category: ItemCategory,
    id: ItemId,
) -> OpResult {
    let item = catalog.item(category, id).ok_or(Rejection::UnknownItem)?;
    if state.owns(category, id) {
        return Err(Rejection::AlreadyOwned);
    }
    if item.price > state.balance {
        return Err(Rejection::InsufficientFunds);
    }

    let price = item.price;
    state.debit(price);
    state.owned.entry(category).or_default().insert(id);
    Ok(vec![GameEvent::CollectiblePurchased {
        category,
        id,
        price,
    }])
}

pub fn sell_collectible(
    state: &mut GameState,
    catalog: &Catalog,
    config: &GameConfig,
    category: ItemCategory,
    id: ItemId,
) -> OpResult {
    let item = catalog.item(category, id).ok_or(Rejection::UnknownItem)?;
    if !state.owns(category, id) {
        return Err(Rejection::NotOwned);
    }

    // Fixed resale tax, floored to whole currency units.
    let proceeds = (item.price * (1.0 - config.resale_tax)).floor();
    state.credit(proceeds);
    if let Some(set) = state.owned.get_mut(&category) {
        set.remove(&id);
    }
    Ok(vec![GameEvent::CollectibleSold {
        category,
        id,
        proceeds,
    }])
}

/// Seed the sellable supply for an instrument if this save has never
/// seen it. Never overwrites: a save's remaining supply survives
/// restarts and catalog reloads.
pub fn ensure_available_shares(state: &mut GameState, instrument_id: &str, total: u64) {
    state
        .available_shares
        .entry(instrument_id.to_string())
        .or_insert(total);
}

pub fn buy_stock(
    state: &mut GameState,
    instrument_id: &str,
    quantity: u64,
    price: f64,
    name: &str,
    now: DateTime<Utc>,
) -> OpResult {
    if quantity == 0 || !price.is_finite() || price <= 0.0 {
        return Err(Rejection::InvalidQuantity);
    }
    // An uninitialized supply entry means unlimited, mirroring the
    // init-if-absent rule: the engine seeds supply from the catalog
    // before trading starts.
    if let Some(&available) = state.available_shares.get(instrument_id) {
        if quantity > available {
            return Err(Rejection::InsufficientShares);
        }
    }
    let cost = quantity as f64 * price;
    if cost > state.balance {
        return Err(Rejection::InsufficientFunds);
    }

    state.debit(cost);
    *state.holdings.entry(instrument_id.to_string()).or_insert(0) += quantity;
    let basis = state
        .cost_basis
        .entry(instrument_id.to_string())
        .or_insert_with(CostBasis::default);
    basis.total_qty += quantity;
    basis.total_cost += cost;
    if let Some(available) = state.available_shares.get_mut(instrument_id) {
        *available -= quantity;
    }
    state.trade_log.push(TradeRecord {
        kind: TradeKind::Buy,
        instrument_id: instrument_id.to_string(),
        name: name.to_string(),
        quantity,
        price,
        timestamp: now,
    });
    Ok(vec![GameEvent::SharesPurchased {
        instrument_id: instrument_id.to_string(),
        quantity,
        price,
        cost,
    }])
}

pub fn sell_stock(
    state: &mut GameState,
    instrument_id: &str,
    quantity: u64,
    price: f64,
    name: &str,
    now: DateTime<Utc>,
) -> OpResult {
    if quantity == 0 || !price.is_finite() || price <= 0.0 {
        return Err(Rejection::InvalidQuantity);
    }
    let held = state.held(instrument_id);
    if quantity > held {
        return Err(Rejection::InsufficientHoldings);
    }

    // No resale tax on stocks, unlike collectibles. Intentional
    // asymmetry.
    let proceeds = quantity as f64 * price;
    state.credit(proceeds);
    if quantity == held {
        state.holdings.remove(instrument_id);
    } else if let Some(h) = state.holdings.get_mut(instrument_id) {
        *h -= quantity;
    }
    *state
        .available_shares
        .entry(instrument_id.to_string())
        .or_insert(0) += quantity;
    state.trade_log.push(TradeRecord {
        kind: TradeKind::Sell,
        instrument_id: instrument_id.to_string(),
        name: name.to_string(),
        quantity,
        price,
        timestamp: now,
    });
    Ok(vec![GameEvent::SharesSold {
        instrument_id: instrument_id.to_string(),
        quantity,
        price,
        proceeds,
    }])
}

/// Realized profit of one sale against the cumulative average cost.
pub fn realized_on_sale(state: &GameState, instrument_id: &str, quantity: u64, price: f64) -> f64 {
    let avg = state
        .cost_basis
        .get(instrument_id)
        .and_then(CostBasis::average)
        .unwrap_or(0.0);
    round2((price - avg) * quantity as f64)
}

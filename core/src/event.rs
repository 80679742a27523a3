//! Observable record of every applied state transition. Events are
//! append-only and persisted to the store's event log as JSON
//! payloads next to a stable type-name column.

use crate::{
    catalog::ItemCategory,
    types::{DepositId, InstrumentId, ItemId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    BalanceClicked {
        amount: f64,
    },

    CollectiblePurchased {
        category: ItemCategory,
        id: ItemId,
        price: f64,
    },
    CollectibleSold {
        category: ItemCategory,
        id: ItemId,
        proceeds: f64,
    },

    SharesPurchased {
        instrument_id: InstrumentId,
        quantity: u64,
        price: f64,
        cost: f64,
    },
    SharesSold {
        instrument_id: InstrumentId,
        quantity: u64,
        price: f64,
        proceeds: f64,
    },
    DividendPaid {
        instrument_id: InstrumentId,
        quantity: u64,
        amount: f64,
    },

    InterestCollected {
        amount: f64,
    },
    FdOpened {
        id: DepositId,
        principal: f64,
        interest: f64,
    },
    FdMatured {
        id: DepositId,
        payout: f64,
    },
    FdWithdrawnEarly {
        id: DepositId,
        penalty: f64,
        payout: f64,
    },
    RdOpened {
        id: DepositId,
        contributed: f64,
        interest: f64,
    },
    RdWithdrawnEarly {
        id: DepositId,
        penalty: f64,
        payout: f64,
    },

    GameReset,
}

/// Extract a stable string name from a GameEvent variant.
/// Used for the event_type column in event_log.
pub fn event_type_name(event: &GameEvent) -> &'static str {
    match event {
        GameEvent::BalanceClicked { .. } => "balance_clicked",
        GameEvent::CollectiblePurchased { .. } => "collectible_purchased",
        GameEvent::CollectibleSold { .. } => "collectible_sold",
        GameEvent::SharesPurchased { .. } => "shares_purchased",
        GameEvent::SharesSold { .. } => "shares_sold",
        GameEvent::DividendPaid { .. } => "dividend_paid",
        GameEvent::InterestCollected { .. } => "interest_collected",
        GameEvent::FdOpened { .. } => "fd_opened",
        GameEvent::FdMatured { .. } => "fd_matured",
        GameEvent::FdWithdrawnEarly { .. } => "fd_withdrawn_early",
        GameEvent::RdOpened { .. } => "rd_opened",
        GameEvent::RdWithdrawnEarly { .. } => "rd_withdrawn_early",
        GameEvent::GameReset => "game_reset",
    }
}

/// The event log entry as persisted to SQLite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id: Option<i64>,
    pub occurred_at: DateTime<Utc>,
    pub event_type: String,
    pub payload: String, // JSON-serialized GameEvent
}

//! Player-issued commands — the closed set of entry points the
//! presentation layer may call. Views never mutate state directly;
//! they submit a command and re-read observable state.

use crate::{
    catalog::ItemCategory,
    types::{DepositId, InstrumentId, ItemId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    /// Manual clicker income.
    Click,

    // ── Collectibles ──────────────────────────────
    BuyCollectible {
        category: ItemCategory,
        id: ItemId,
    },
    SellCollectible {
        category: ItemCategory,
        id: ItemId,
    },

    // ── Stocks ────────────────────────────────────
    /// `price` and `name` come from the caller's live quote, matching
    /// the view boundary: the engine validates, it does not re-quote.
    BuyStock {
        instrument_id: InstrumentId,
        quantity: u64,
        price: f64,
        name: String,
    },
    SellStock {
        instrument_id: InstrumentId,
        quantity: u64,
        price: f64,
        name: String,
    },
    CollectDividends,

    // ── Stable income ─────────────────────────────
    CollectInterest,
    StartFd {
        amount: f64,
    },
    EndFd {
        id: DepositId,
    },
    EarlyWithdrawFd {
        id: DepositId,
    },
    StartRd {
        initial: f64,
        monthly: f64,
        months: u32,
    },
    EarlyWithdrawRd {
        id: DepositId,
    },

    ResetGame,
}

/// Why a command was not applied. Rejections are silent no-ops at the
/// engine boundary: state is untouched, nothing is thrown, the view
/// may surface `reason()` inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    UnknownItem,
    AlreadyOwned,
    NotOwned,
    InsufficientFunds,
    InsufficientShares,
    InsufficientHoldings,
    InvalidQuantity,
    InvalidAmount,
    CooldownActive,
    PricesUnavailable,
    NothingToCollect,
    DepositNotFound,
    NotMatured,
}

impl Rejection {
    pub fn reason(&self) -> &'static str {
        match self {
            Self::UnknownItem => "unknown_item",
            Self::AlreadyOwned => "already_owned",
            Self::NotOwned => "not_owned",
            Self::InsufficientFunds => "insufficient_funds",
            Self::InsufficientShares => "insufficient_shares",
            Self::InsufficientHoldings => "insufficient_holdings",
            Self::InvalidQuantity => "invalid_quantity",
            Self::InvalidAmount => "invalid_amount",
            Self::CooldownActive => "cooldown_active",
            Self::PricesUnavailable => "prices_unavailable",
            Self::NothingToCollect => "nothing_to_collect",
            Self::DepositNotFound => "deposit_not_found",
            Self::NotMatured => "not_matured",
        }
    }
}

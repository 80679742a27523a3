//! Shared primitive types used across the entire engine.

/// Identifier of a tradable instrument, as defined by the catalog.
pub type InstrumentId = String;

/// Identifier of a collectible catalog item within its category.
pub type ItemId = u64;

/// Identifier of a fixed or recurring deposit. Allocated from a
/// monotonic per-save counter.
pub type DepositId = u64;

/// Round a currency amount to 2 decimal places.
/// Every credited amount in the engine goes through this.
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

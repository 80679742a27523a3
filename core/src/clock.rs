//! Wall-clock source. All time-gated rules (cooldowns, deposit
//! maturity, price-history pruning) read time only through this,
//! so tests can fast-forward without sleeping.

use chrono::{DateTime, Duration, TimeZone, Utc};

#[derive(Debug, Clone)]
pub enum GameClock {
    /// Real wall clock.
    System,
    /// Fixed instant, advanced explicitly. Used in tests.
    Manual(DateTime<Utc>),
}

impl GameClock {
    pub fn system() -> Self {
        GameClock::System
    }

    /// A manual clock pinned to an arbitrary but fixed epoch.
    pub fn manual() -> Self {
        GameClock::Manual(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
    }

    pub fn now(&self) -> DateTime<Utc> {
        match self {
            GameClock::System => Utc::now(),
            GameClock::Manual(instant) => *instant,
        }
    }

    /// Advance a manual clock. Panics on a system clock — callers
    /// must know which mode they run in.
    pub fn advance(&mut self, delta: Duration) {
        match self {
            GameClock::System => panic!("advance() called on a system clock"),
            GameClock::Manual(instant) => *instant += delta,
        }
    }
}

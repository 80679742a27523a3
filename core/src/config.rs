//! Engine tunables. Every rate, cooldown, and bound the rules use
//! lives here — nothing is hardcoded at the use site.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Balance of a fresh (or reset) save.
    pub starting_balance: f64,
    /// Amount credited per manual click.
    pub earning_per_click: f64,
    /// Fraction withheld when a collectible is liquidated.
    pub resale_tax: f64,
    /// Gate between dividend payouts. Intentionally a parameter:
    /// the fast-iteration build ran at 5 s, the intended interval
    /// is 3 h. Neither is hardcoded.
    pub dividend_cooldown_secs: u64,
    /// Gate between manual interest collections (12 h).
    pub interest_cooldown_secs: u64,
    /// Interest paid on the whole balance per collection (0.5%).
    pub interest_rate: f64,
    /// Fixed-deposit rate, fixed at creation on the principal.
    pub fd_rate: f64,
    pub fd_term_months: u32,
    /// Early-withdrawal penalty on principal + interest.
    pub fd_early_penalty: f64,
    /// Recurring-deposit rate, fixed at creation on the total
    /// contribution.
    pub rd_rate: f64,
    pub rd_early_penalty: f64,
    /// 30-day month approximation used for deposit progress math.
    pub month_secs: u64,
    pub market: MarketConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Random-walk tick period driven by the caller's timer.
    pub tick_secs: u64,
    /// Prices never fall below this.
    pub min_price: f64,
    /// Rolling in-session chart buffer, newest N points.
    pub session_points: usize,
    /// Persisted price history window, pruned by age (3 h).
    pub history_window_secs: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_balance: 5_000.0,
            earning_per_click: 1e19,
            resale_tax: 0.30,
            dividend_cooldown_secs: 3 * 60 * 60,
            interest_cooldown_secs: 12 * 60 * 60,
            interest_rate: 0.005,
            fd_rate: 0.07,
            fd_term_months: 12,
            fd_early_penalty: 0.02,
            rd_rate: 0.08,
            rd_early_penalty: 0.03,
            month_secs: 30 * 24 * 60 * 60,
            market: MarketConfig::default(),
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            tick_secs: 3,
            min_price: 1.0,
            session_points: 20,
            history_window_secs: 3 * 60 * 60,
        }
    }
}

impl GameConfig {
    pub fn dividend_cooldown(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.dividend_cooldown_secs as i64)
    }

    pub fn interest_cooldown(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.interest_cooldown_secs as i64)
    }

    pub fn fd_term(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.month_secs as i64 * self.fd_term_months as i64)
    }
}

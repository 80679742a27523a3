//! Cooldown-gated passive income: dividends on held shares and the
//! manual interest collection. Both gates are wall-clock timestamps
//! persisted in the state, so cooldowns survive restarts.

use crate::{
    command::Rejection,
    config::GameConfig,
    event::GameEvent,
    market::Quote,
    state::{GameState, IncomeKind, IncomeRecord, TradeKind, TradeRecord},
    types::round2,
};
use chrono::{DateTime, Duration, Utc};

type OpResult = Result<Vec<GameEvent>, Rejection>;

/// Pay out `price × yield × quantity` per held instrument.
///
/// - Inside the cooldown window this is a no-op; the gate only
///   advances on an actual payout, so two calls inside one window pay
///   exactly once.
/// - An empty quote list means the price feed has not been supplied
///   yet: safe no-op, retried on the next natural trigger.
pub fn earn_dividends(
    state: &mut GameState,
    quotes: &[Quote],
    now: DateTime<Utc>,
    config: &GameConfig,
) -> OpResult {
    if let Some(last) = state.last_dividend_time {
        if now - last < config.dividend_cooldown() {
            return Err(Rejection::CooldownActive);
        }
    }
    if quotes.is_empty() {
        return Err(Rejection::PricesUnavailable);
    }

    let mut payouts: Vec<(String, String, u64, f64)> = Vec::new();
    for (instrument_id, &quantity) in &state.holdings {
        if quantity == 0 {
            continue;
        }
        let Some(quote) = quotes.iter().find(|q| &q.id == instrument_id) else {
            continue;
        };
        let total = round2(quote.price * quote.dividend_yield * quantity as f64);
        if total > 0.0 {
            payouts.push((instrument_id.clone(), quote.name.clone(), quantity, total));
        }
    }
    if payouts.is_empty() {
        return Err(Rejection::NothingToCollect);
    }

    let mut events = Vec::with_capacity(payouts.len());
    let mut sum = 0.0;
    for (instrument_id, name, quantity, total) in payouts {
        sum += total;
        state.trade_log.push(TradeRecord {
            kind: TradeKind::Dividend,
            instrument_id: instrument_id.clone(),
            name,
            quantity,
            // Dividend records carry the payout in the price field.
            price: total,
            timestamp: now,
        });
        events.push(GameEvent::DividendPaid {
            instrument_id,
            quantity,
            amount: total,
        });
    }
    state.credit(sum);
    state.last_dividend_time = Some(now);
    Ok(events)
}

/// Manual "collect interest" action: 0.5% of the current balance,
/// once per 12 h.
pub fn earn_interest(state: &mut GameState, now: DateTime<Utc>, config: &GameConfig) -> OpResult {
    if interest_cooldown_remaining(state, now, config).is_some() {
        return Err(Rejection::CooldownActive);
    }

    let interest = round2(state.balance * config.interest_rate);
    state.income_log.push(IncomeRecord {
        kind: IncomeKind::Earn,
        amount: state.balance,
        interest,
        timestamp: now,
    });
    state.credit(interest);
    state.last_interest_time = Some(now);
    Ok(vec![GameEvent::InterestCollected { amount: interest }])
}

/// Time left until the next interest collection, None when eligible.
/// Exposed for display as HH:MM:SS via [`format_countdown`].
pub fn interest_cooldown_remaining(
    state: &GameState,
    now: DateTime<Utc>,
    config: &GameConfig,
) -> Option<Duration> {
    let last = state.last_interest_time?;
    let elapsed = now - last;
    let cooldown = config.interest_cooldown();
    (elapsed < cooldown).then(|| cooldown - elapsed)
}

/// Format a countdown as HH:MM:SS (hours can exceed two digits).
pub fn format_countdown(remaining: Duration) -> String {
    let total = remaining.num_seconds().max(0);
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

//! Fixed and recurring deposits.
//!
//! FD lifecycle: Active -> Matured-Withdrawn | Early-Withdrawn, both
//! terminal (the record is removed and the payout credited).
//! RD lifecycle: Active -> Early-Withdrawn only; there is no separate
//! matured-payout operation.
//!
//! Interest is fixed at creation and never re-accrued; progress is
//! elapsed wall-clock time against a 30-day month approximation.

use crate::{
    command::Rejection,
    config::GameConfig,
    event::GameEvent,
    state::{FixedDeposit, GameState, IncomeKind, IncomeRecord, RecurringDeposit},
    types::{round2, DepositId},
};
use chrono::{DateTime, Duration, Utc};

type OpResult = Result<Vec<GameEvent>, Rejection>;

pub fn start_fd(
    state: &mut GameState,
    amount: f64,
    now: DateTime<Utc>,
    config: &GameConfig,
) -> OpResult {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Rejection::InvalidAmount);
    }
    if amount > state.balance {
        return Err(Rejection::InsufficientFunds);
    }

    let interest = round2(amount * config.fd_rate);
    let id = state.alloc_deposit_id();
    state.debit(amount);
    state.fds.push(FixedDeposit {
        id,
        principal: amount,
        interest,
        start: now,
        term_months: config.fd_term_months,
    });
    state.income_log.push(IncomeRecord {
        kind: IncomeKind::FdStart,
        amount,
        interest,
        timestamp: now,
    });
    Ok(vec![GameEvent::FdOpened {
        id,
        principal: amount,
        interest,
    }])
}

/// Maturity withdrawal. Only valid once the full term has elapsed.
pub fn end_fd(
    state: &mut GameState,
    id: DepositId,
    now: DateTime<Utc>,
    config: &GameConfig,
) -> OpResult {
    let idx = state
        .fds
        .iter()
        .position(|fd| fd.id == id)
        .ok_or(Rejection::DepositNotFound)?;
    let term = Duration::seconds(config.month_secs as i64 * state.fds[idx].term_months as i64);
    if now - state.fds[idx].start < term {
        return Err(Rejection::NotMatured);
    }

    let fd = state.fds.remove(idx);
    let payout = round2(fd.principal + fd.interest);
    state.credit(payout);
    state.income_log.push(IncomeRecord {
        kind: IncomeKind::FdEnd,
        amount: fd.principal,
        interest: fd.interest,
        timestamp: now,
    });
    Ok(vec![GameEvent::FdMatured { id, payout }])
}

/// Early withdrawal, valid any time before removal. The penalty is a
/// fixed cut of principal + interest; the logged interest is the net
/// figure after the penalty.
pub fn early_withdraw_fd(
    state: &mut GameState,
    id: DepositId,
    now: DateTime<Utc>,
    config: &GameConfig,
) -> OpResult {
    let idx = state
        .fds
        .iter()
        .position(|fd| fd.id == id)
        .ok_or(Rejection::DepositNotFound)?;

    let fd = state.fds.remove(idx);
    let penalty = round2(config.fd_early_penalty * (fd.principal + fd.interest));
    let net_interest = round2(fd.interest - penalty);
    let payout = round2(fd.principal + net_interest);
    state.credit(payout);
    state.income_log.push(IncomeRecord {
        kind: IncomeKind::FdEarly,
        amount: fd.principal,
        interest: net_interest,
        timestamp: now,
    });
    Ok(vec![GameEvent::FdWithdrawnEarly { id, penalty, payout }])
}

pub fn start_rd(
    state: &mut GameState,
    initial: f64,
    monthly: f64,
    months: u32,
    now: DateTime<Utc>,
    config: &GameConfig,
) -> OpResult {
    if !initial.is_finite() || !monthly.is_finite() || initial < 0.0 {
        return Err(Rejection::InvalidAmount);
    }
    if monthly <= 0.0 || months == 0 {
        return Err(Rejection::InvalidAmount);
    }
    // The whole contribution schedule is debited up front.
    let total = initial + monthly * months as f64;
    if total > state.balance {
        return Err(Rejection::InsufficientFunds);
    }

    let interest = round2(total * config.rd_rate);
    let id = state.alloc_deposit_id();
    state.debit(total);
    state.rds.push(RecurringDeposit {
        id,
        monthly,
        term_months: months,
        initial,
        contributed: total,
        interest,
        start: now,
    });
    state.income_log.push(IncomeRecord {
        kind: IncomeKind::RdStart,
        amount: total,
        interest,
        timestamp: now,
    });
    Ok(vec![GameEvent::RdOpened {
        id,
        contributed: total,
        interest,
    }])
}

pub fn early_withdraw_rd(
    state: &mut GameState,
    id: DepositId,
    now: DateTime<Utc>,
    config: &GameConfig,
) -> OpResult {
    let idx = state
        .rds
        .iter()
        .position(|rd| rd.id == id)
        .ok_or(Rejection::DepositNotFound)?;

    let rd = state.rds.remove(idx);
    let penalty = round2(config.rd_early_penalty * (rd.contributed + rd.interest));
    let net_interest = round2(rd.interest - penalty);
    let payout = round2(rd.contributed + net_interest);
    state.credit(payout);
    state.income_log.push(IncomeRecord {
        kind: IncomeKind::RdEarly,
        amount: rd.contributed,
        interest: net_interest,
        timestamp: now,
    });
    Ok(vec![GameEvent::RdWithdrawnEarly { id, penalty, payout }])
}

/// Completion percentage of a deposit term, clamped to [0, 100].
pub fn progress_percent(
    start: DateTime<Utc>,
    term_months: u32,
    now: DateTime<Utc>,
    config: &GameConfig,
) -> f64 {
    if term_months == 0 {
        return 100.0;
    }
    let elapsed_months = (now - start).num_seconds() as f64 / config.month_secs as f64;
    (elapsed_months / term_months as f64 * 100.0).clamp(0.0, 100.0)
}

/// Whole months remaining, clamped to >= 0.
pub fn months_left(
    start: DateTime<Utc>,
    term_months: u32,
    now: DateTime<Utc>,
    config: &GameConfig,
) -> u32 {
    let elapsed_months = (now - start).num_seconds() as f64 / config.month_secs as f64;
    (term_months as f64 - elapsed_months).ceil().max(0.0) as u32
}

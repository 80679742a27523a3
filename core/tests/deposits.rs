//! Fixed- and recurring-deposit tests: up-front debits, fixed
//! interest, maturity gating, early-withdrawal penalties.

use chrono::Duration;
use tycoon_core::{
    command::{PlayerCommand, Rejection},
    engine::GameEngine,
};

#[test]
fn fd_debits_the_principal_and_fixes_interest_at_creation() {
    let mut engine = GameEngine::build_test(42).unwrap();

    let outcome = engine.apply(PlayerCommand::StartFd { amount: 1_000.0 }).unwrap();
    assert!(outcome.is_applied());

    assert_eq!(engine.state.balance, 4_000.0);
    assert_eq!(engine.state.fds.len(), 1);
    // 7% of 1 000, locked in regardless of later balance.
    assert_eq!(engine.state.fds[0].interest, 70.0);
    assert_eq!(engine.state.fds[0].term_months, 12);
}

#[test]
fn fd_cannot_be_ended_before_maturity() {
    let mut engine = GameEngine::build_test(42).unwrap();
    engine.apply(PlayerCommand::StartFd { amount: 1_000.0 }).unwrap();
    let id = engine.state.fds[0].id;

    // 11 of 12 months elapsed.
    engine
        .clock
        .advance(Duration::seconds(engine.config.month_secs as i64 * 11));
    let outcome = engine.apply(PlayerCommand::EndFd { id }).unwrap();
    assert_eq!(outcome.rejection(), Some(Rejection::NotMatured));
    assert_eq!(engine.state.fds.len(), 1);
}

#[test]
fn matured_fd_pays_principal_plus_interest() {
    let mut engine = GameEngine::build_test(42).unwrap();
    engine.apply(PlayerCommand::StartFd { amount: 1_000.0 }).unwrap();
    let id = engine.state.fds[0].id;

    engine.clock.advance(engine.config.fd_term());
    let outcome = engine.apply(PlayerCommand::EndFd { id }).unwrap();
    assert!(outcome.is_applied());

    assert_eq!(engine.state.balance, 5_070.0);
    assert!(engine.state.fds.is_empty());
}

#[test]
fn early_fd_withdrawal_takes_the_two_percent_penalty() {
    let mut engine = GameEngine::build_test(42).unwrap();
    engine.apply(PlayerCommand::StartFd { amount: 1_000.0 }).unwrap();
    let id = engine.state.fds[0].id;

    let outcome = engine.apply(PlayerCommand::EarlyWithdrawFd { id }).unwrap();
    assert!(outcome.is_applied());

    // penalty = 2% × 1 070 = 21.40; payout = 1 000 + 70 − 21.40.
    assert!((engine.state.balance - 5_048.60).abs() < 1e-9);
    assert!(engine.state.fds.is_empty());
    let record = engine.state.income_log.last().unwrap();
    assert!((record.interest - 48.60).abs() < 1e-9);
}

#[test]
fn fd_rejects_bad_amounts_and_unknown_ids() {
    let mut engine = GameEngine::build_test(42).unwrap();

    let outcome = engine.apply(PlayerCommand::StartFd { amount: -5.0 }).unwrap();
    assert_eq!(outcome.rejection(), Some(Rejection::InvalidAmount));

    let outcome = engine.apply(PlayerCommand::StartFd { amount: f64::NAN }).unwrap();
    assert_eq!(outcome.rejection(), Some(Rejection::InvalidAmount));

    let outcome = engine.apply(PlayerCommand::StartFd { amount: 6_000.0 }).unwrap();
    assert_eq!(outcome.rejection(), Some(Rejection::InsufficientFunds));

    let outcome = engine.apply(PlayerCommand::EndFd { id: 77 }).unwrap();
    assert_eq!(outcome.rejection(), Some(Rejection::DepositNotFound));

    assert_eq!(engine.state.balance, 5_000.0);
}

#[test]
fn rd_debits_the_whole_contribution_schedule_up_front() {
    let mut engine = GameEngine::build_test(42).unwrap();

    let outcome = engine
        .apply(PlayerCommand::StartRd {
            initial: 100.0,
            monthly: 100.0,
            months: 12,
        })
        .unwrap();
    assert!(outcome.is_applied());

    // 100 + 100 × 12 = 1 300 debited immediately.
    assert_eq!(engine.state.balance, 3_700.0);
    assert_eq!(engine.state.rds[0].contributed, 1_300.0);
    // 8% of 1 300.
    assert_eq!(engine.state.rds[0].interest, 104.0);
}

#[test]
fn early_rd_withdrawal_takes_the_three_percent_penalty() {
    let mut engine = GameEngine::build_test(42).unwrap();
    engine
        .apply(PlayerCommand::StartRd {
            initial: 100.0,
            monthly: 100.0,
            months: 12,
        })
        .unwrap();
    let id = engine.state.rds[0].id;

    let outcome = engine.apply(PlayerCommand::EarlyWithdrawRd { id }).unwrap();
    assert!(outcome.is_applied());

    // penalty = 3% × 1 404 = 42.12; payout = 1 300 + 104 − 42.12.
    assert!((engine.state.balance - 5_061.88).abs() < 1e-9);
    assert!(engine.state.rds.is_empty());
}

#[test]
fn rd_rejects_degenerate_schedules() {
    let mut engine = GameEngine::build_test(42).unwrap();

    for (initial, monthly, months) in [
        (0.0, 0.0, 12),
        (0.0, 100.0, 0),
        (-1.0, 100.0, 12),
        (0.0, f64::INFINITY, 12),
    ] {
        let outcome = engine
            .apply(PlayerCommand::StartRd {
                initial,
                monthly,
                months,
            })
            .unwrap();
        assert_eq!(outcome.rejection(), Some(Rejection::InvalidAmount));
    }
    assert_eq!(engine.state.balance, 5_000.0);
}

#[test]
fn deposit_ids_stay_unique_across_kinds_and_withdrawals() {
    let mut engine = GameEngine::build_test(42).unwrap();

    engine.apply(PlayerCommand::StartFd { amount: 500.0 }).unwrap();
    engine
        .apply(PlayerCommand::StartRd {
            initial: 0.0,
            monthly: 50.0,
            months: 6,
        })
        .unwrap();
    let fd_id = engine.state.fds[0].id;
    let rd_id = engine.state.rds[0].id;
    assert_ne!(fd_id, rd_id);

    engine
        .apply(PlayerCommand::EarlyWithdrawFd { id: fd_id })
        .unwrap();
    engine.apply(PlayerCommand::StartFd { amount: 500.0 }).unwrap();
    // Ids never get reused, even after a slot frees up.
    assert_ne!(engine.state.fds[0].id, fd_id);
    assert_ne!(engine.state.fds[0].id, rd_id);
}

//! Derived read-model tests: fortune breakdown and trading P/L.

use tycoon_core::{
    catalog::{Catalog, ItemCategory},
    clock::GameClock,
    command::PlayerCommand,
    config::GameConfig,
    engine::GameEngine,
    report,
    store::GameStore,
};

fn rich_engine(balance: f64) -> GameEngine {
    let store = GameStore::in_memory().unwrap();
    store.migrate().unwrap();
    let config = GameConfig {
        starting_balance: balance,
        ..GameConfig::default()
    };
    GameEngine::load_or_new(store, Catalog::builtin(), config, GameClock::manual(), 42).unwrap()
}

#[test]
fn fortune_adds_balance_collectibles_holdings_and_deposits() {
    let mut engine = rich_engine(1_000_000.0);
    engine
        .apply(PlayerCommand::BuyCollectible {
            category: ItemCategory::Cars,
            id: 1,
        })
        .unwrap();
    engine
        .apply(PlayerCommand::BuyStock {
            instrument_id: "tata".to_string(),
            quantity: 5,
            price: 100.0,
            name: "Tata".to_string(),
        })
        .unwrap();
    engine.apply(PlayerCommand::StartFd { amount: 1_000.0 }).unwrap();
    engine.tick_market().unwrap();

    let summary = report::fortune_summary(
        &engine.state,
        &engine.catalog,
        engine.live_quotes(),
        &engine.config,
    );

    let live_tata = engine.quote("tata").unwrap().price;
    assert_eq!(summary.collectibles_value, 250_000.0);
    assert!((summary.holdings_value - live_tata * 5.0).abs() < 1e-9);
    assert_eq!(summary.deposits_value, 1_070.0);
    assert_eq!(summary.owned_counts[&ItemCategory::Cars], 1);

    let expected_total = summary.balance
        + summary.collectibles_value
        + summary.holdings_value
        + summary.deposits_value;
    assert!((summary.total_fortune - expected_total).abs() < 1e-9);
}

#[test]
fn holdings_fall_back_to_cost_basis_before_the_feed_is_live() {
    let mut engine = rich_engine(1_000_000.0);
    engine
        .apply(PlayerCommand::BuyStock {
            instrument_id: "tata".to_string(),
            quantity: 4,
            price: 200.0,
            name: "Tata".to_string(),
        })
        .unwrap();

    // No tick: live_quotes() is empty, value comes from the basis.
    let summary = report::fortune_summary(
        &engine.state,
        &engine.catalog,
        engine.live_quotes(),
        &engine.config,
    );
    assert!((summary.holdings_value - 800.0).abs() < 1e-9);
}

#[test]
fn realized_pl_measures_sells_against_average_cost() {
    let mut engine = GameEngine::build_test(42).unwrap();
    engine
        .apply(PlayerCommand::BuyStock {
            instrument_id: "tata".to_string(),
            quantity: 2,
            price: 100.0,
            name: "Tata".to_string(),
        })
        .unwrap();
    engine
        .apply(PlayerCommand::SellStock {
            instrument_id: "tata".to_string(),
            quantity: 1,
            price: 150.0,
            name: "Tata".to_string(),
        })
        .unwrap();

    assert!((report::realized_trading_pl(&engine.state) - 50.0).abs() < 1e-9);
}

#[test]
fn realized_pl_aggregates_each_sale_separately() {
    let mut engine = GameEngine::build_test(42).unwrap();
    engine
        .apply(PlayerCommand::BuyStock {
            instrument_id: "tata".to_string(),
            quantity: 4,
            price: 100.0,
            name: "Tata".to_string(),
        })
        .unwrap();
    engine
        .apply(PlayerCommand::SellStock {
            instrument_id: "tata".to_string(),
            quantity: 1,
            price: 150.0,
            name: "Tata".to_string(),
        })
        .unwrap();
    engine
        .apply(PlayerCommand::SellStock {
            instrument_id: "tata".to_string(),
            quantity: 2,
            price: 90.0,
            name: "Tata".to_string(),
        })
        .unwrap();

    // Average cost stays 100: +50 on the first sale, -20 on the second.
    assert!((report::realized_trading_pl(&engine.state) - 30.0).abs() < 1e-9);
}

#[test]
fn total_pl_includes_dividend_payouts() {
    let mut engine = GameEngine::build_test(42).unwrap();
    engine
        .apply(PlayerCommand::BuyStock {
            instrument_id: "tata".to_string(),
            quantity: 5,
            price: 500.65,
            name: "Tata".to_string(),
        })
        .unwrap();
    engine.tick_market().unwrap();
    engine.apply(PlayerCommand::CollectDividends).unwrap();

    let dividends: f64 = engine
        .state
        .trade_log
        .iter()
        .filter(|r| r.kind == tycoon_core::state::TradeKind::Dividend)
        .map(|r| r.price)
        .sum();
    assert!(dividends > 0.0);
    assert!(
        (report::total_trading_pl(&engine.state)
            - report::realized_trading_pl(&engine.state)
            - dividends)
            .abs()
            < 1e-9
    );
}

#[test]
fn stable_income_totals_split_settled_from_pending() {
    let mut engine = GameEngine::build_test(42).unwrap();
    engine.apply(PlayerCommand::CollectInterest).unwrap();
    engine.apply(PlayerCommand::StartFd { amount: 1_000.0 }).unwrap();

    // 25 interest collected + 70 locked in the open FD.
    assert!((report::total_stable_income(&engine.state) - 95.0).abs() < 1e-9);
    // Only the collected interest counts as settled.
    assert!((report::settled_stable_income(&engine.state) - 25.0).abs() < 1e-9);

    let fd_rows = report::filtered_income(&engine.state, report::IncomeFilter::Fd).count();
    assert_eq!(fd_rows, 1);
    let all_rows = report::filtered_income(&engine.state, report::IncomeFilter::All).count();
    assert_eq!(all_rows, 2);
}

//! tycoon-runner: headless driver for the tycoon engine.
//!
//! Usage:
//!   tycoon-runner --seed 12345 --ticks 100 --db save.db --data-dir ./data

use anyhow::Result;
use std::env;
use tycoon_core::{
    catalog::Catalog,
    clock::GameClock,
    command::PlayerCommand,
    config::GameConfig,
    engine::{CommandOutcome, GameEngine},
    report,
    store::GameStore,
};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let ticks = parse_arg(&args, "--ticks", 100u64);
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str())
        .unwrap_or("./data");

    println!("tycoon-runner");
    println!("  seed:     {seed}");
    println!("  ticks:    {ticks}");
    println!("  db:       {db}");
    println!("  data_dir: {data_dir}");
    println!();

    let store = if db == ":memory:" {
        GameStore::in_memory()?
    } else {
        GameStore::open(db)?
    };
    store.migrate()?;

    let catalog = match Catalog::load(data_dir) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("catalog load failed ({e}); using built-in catalog");
            Catalog::builtin()
        }
    };

    let config = GameConfig::default();
    let mut engine = GameEngine::load_or_new(store, catalog, config, GameClock::system(), seed)?;

    // Drive the market and collect dividends whenever the gate opens.
    // The 3-second tick period is simulated, not slept.
    for _ in 0..ticks {
        engine.tick_market()?;
        if let CommandOutcome::Applied(events) = engine.apply(PlayerCommand::CollectDividends)? {
            log::info!("dividends: {} payouts", events.len());
        }
    }

    print_summary(&engine)?;
    Ok(())
}

fn print_summary(engine: &GameEngine) -> Result<()> {
    let state = &engine.state;
    let summary = report::fortune_summary(
        state,
        &engine.catalog,
        engine.live_quotes(),
        &engine.config,
    );

    println!("=== RUN SUMMARY ===");
    println!("  balance:         {}", report::format_compact(summary.balance));
    println!("  collectibles:    {}", report::format_compact(summary.collectibles_value));
    println!("  holdings:        {}", report::format_compact(summary.holdings_value));
    println!("  deposits:        {}", report::format_compact(summary.deposits_value));
    println!("  stable income:   {}", report::format_compact(summary.stable_income_total));
    println!("  realized P/L:    {}", report::format_compact(summary.realized_trading_pl));
    println!("  total fortune:   {}", report::format_compact(summary.total_fortune));

    println!();
    println!("=== MARKET ===");
    for quote in engine.live_quotes() {
        let held = state.held(&quote.id);
        let available = state.available_shares.get(&quote.id).copied().unwrap_or(0);
        println!(
            "  {:10} {:>10.2} ({:+8.2})  held: {:>5}  supply: {:>6}",
            quote.name, quote.price, quote.change, held, available
        );
    }

    let events = engine.store().event_count()?;
    println!();
    println!("  events logged: {events}");
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

//! Market simulator — a bounded uniform random walk per instrument.
//!
//! Each tick draws a delta in ±delta_range, floors the price at the
//! configured minimum and rounds to 2 decimals. The new price lands
//! in two places: the in-session chart buffer (newest 20 points,
//! count-capped, not persisted) and the state's price history
//! (age-capped at 3 h, persisted). This is a gameplay randomizer,
//! not a reproducible simulation; tests pin the seed and assert
//! invariants only.

use crate::{
    catalog::Catalog,
    config::MarketConfig,
    rng::{InstrumentRng, RngBank},
    state::{GameState, PricePoint},
    types::{round2, InstrumentId},
};
use chrono::{DateTime, Duration, Utc};

/// Live view of one instrument, rebuilt from the catalog each run.
#[derive(Debug, Clone)]
pub struct Quote {
    pub id: InstrumentId,
    pub name: String,
    pub price: f64,
    /// Delta applied by the last tick.
    pub change: f64,
    pub dividend_yield: f64,
    pub capitalization: f64,
    delta_range: f64,
    /// Rolling session chart buffer, capped by point count.
    pub session: Vec<PricePoint>,
}

pub struct MarketSimulator {
    quotes: Vec<Quote>,
    streams: Vec<InstrumentRng>,
    config: MarketConfig,
    ticked: bool,
}

impl MarketSimulator {
    pub fn new(catalog: &Catalog, config: MarketConfig, bank: &RngBank) -> Self {
        let quotes: Vec<Quote> = catalog
            .instruments()
            .iter()
            .map(|spec| Quote {
                id: spec.id.clone(),
                name: spec.name.clone(),
                price: spec.base_price,
                change: 0.0,
                dividend_yield: spec.dividend_yield,
                capitalization: spec.capitalization,
                delta_range: spec.delta_range,
                session: Vec::new(),
            })
            .collect();
        // One persistent stream per catalog position.
        let streams = (0..quotes.len() as u64)
            .map(|i| bank.for_instrument(i))
            .collect();
        Self {
            quotes,
            streams,
            config,
            ticked: false,
        }
    }

    /// Advance every instrument one step and record the new prices
    /// into the state's persisted history.
    pub fn tick(&mut self, state: &mut GameState, now: DateTime<Utc>) {
        let window = Duration::seconds(self.config.history_window_secs as i64);
        for (quote, rng) in self.quotes.iter_mut().zip(&mut self.streams) {
            let delta = round2(rng.uniform_delta(quote.delta_range));
            let next = round2(quote.price + delta).max(self.config.min_price);
            quote.change = delta;
            quote.price = next;

            quote.session.push(PricePoint {
                timestamp: now,
                price: next,
            });
            if quote.session.len() > self.config.session_points {
                let excess = quote.session.len() - self.config.session_points;
                quote.session.drain(..excess);
            }

            state.record_price_point(&quote.id, next, now, window);
        }
        self.ticked = true;
        log::debug!("market tick: {} instruments updated", self.quotes.len());
    }

    /// Quotes once the feed is live. Empty before the first tick so
    /// dividend computation stays a safe no-op until prices exist.
    pub fn live_quotes(&self) -> &[Quote] {
        if self.ticked {
            &self.quotes
        } else {
            &[]
        }
    }

    pub fn quote(&self, instrument_id: &str) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.id == instrument_id)
    }
}

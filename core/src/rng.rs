//! Random number generation for the market random walk.
//!
//! RULE: Nothing in the engine calls the platform RNG directly.
//! Each instrument gets its own stream, derived from one master seed
//! and the instrument's stable catalog index, so adding an instrument
//! never perturbs existing streams. The game does not require
//! determinism; seeded streams exist to keep the invariant tests
//! reproducible.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A deterministic RNG stream for a single instrument.
pub struct InstrumentRng {
    inner: Pcg64Mcg,
}

impl InstrumentRng {
    /// Derive from the master seed and a stable instrument index.
    /// The index must never change once assigned.
    pub fn new(master_seed: u64, instrument_index: u64) -> Self {
        let derived = master_seed ^ (instrument_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            inner: Pcg64Mcg::seed_from_u64(derived),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform price delta in [-range, +range).
    pub fn uniform_delta(&mut self, range: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * range
    }
}

/// Derives per-instrument streams for one run.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_instrument(&self, index: u64) -> InstrumentRng {
        InstrumentRng::new(self.master_seed, index)
    }
}

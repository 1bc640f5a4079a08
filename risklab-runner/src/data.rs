//! Deterministic synthetic bar generation.
//!
//! Produces an hourly random walk for development and tests. The walk is
//! fully determined by the seed, so runs over synthetic data reproduce
//! exactly.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use risklab_core::domain::Bar;

/// Generate `count` hourly bars starting at `start`.
///
/// A simple random walk from 100.0: per-bar return in ±2%, a small upward
/// wiggle on the high and downward wiggle on the low so every bar satisfies
/// `is_sane`.
pub fn synthetic_bars(seed: u64, count: usize, start: DateTime<Utc>) -> Vec<Bar> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut bars = Vec::with_capacity(count);
    let mut price = 100.0_f64;

    for i in 0..count {
        let bar_return: f64 = rng.gen_range(-0.02..0.02);
        let open = price;
        let close = price * (1.0 + bar_return);
        let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.005));
        let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.005));
        let volume = rng.gen_range(1_000.0..100_000.0);

        bars.push(Bar::new(
            start + Duration::hours(i as i64),
            open,
            high,
            low,
            close,
            volume,
        ));
        price = close;
    }

    bars
}

//! Indicator helpers — pure numeric transforms of a price series.
//!
//! Every helper returns `Option<f64>`: `None` means insufficient warm-up
//! data, carried explicitly rather than through NaN sentinels.

pub mod atr;
pub mod rsi;
pub mod sma;

pub use atr::atr;
pub use rsi::rsi;
pub use sma::sma;

#[cfg(test)]
pub(crate) mod testing {
    use crate::domain::Bar;
    use chrono::{Duration, TimeZone, Utc};

    pub const DEFAULT_EPSILON: f64 = 1e-9;

    pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
        assert!(
            (actual - expected).abs() < epsilon,
            "expected {expected}, got {actual}"
        );
    }

    /// Bars from closes alone; OHLC collapsed onto the close.
    pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
        let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(base + Duration::hours(i as i64), c, c, c, c, 1_000.0))
            .collect()
    }

    /// Bars from explicit (open, high, low, close) tuples.
    pub fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<Bar> {
        let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        data.iter()
            .enumerate()
            .map(|(i, &(open, high, low, close))| {
                Bar::new(base + Duration::hours(i as i64), open, high, low, close, 1_000.0)
            })
            .collect()
    }
}

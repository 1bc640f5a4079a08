//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|).
//! ATR uses Wilder smoothing (alpha = 1/period), seeded with the simple
//! average of the first `period` true ranges. Needs `period + 1` bars: the
//! first bar only anchors the previous close.

use crate::domain::Bar;

/// True range series, starting at the second bar.
fn true_ranges(bars: &[Bar]) -> Vec<f64> {
    bars.windows(2)
        .map(|w| {
            let prev_close = w[0].close;
            let h = w[1].high;
            let l = w[1].low;
            (h - l).max((h - prev_close).abs()).max((l - prev_close).abs())
        })
        .collect()
}

/// Latest ATR value, or `None` when fewer than `period + 1` bars are
/// available or the period is zero.
pub fn atr(bars: &[Bar], period: usize) -> Option<f64> {
    if period == 0 || bars.len() < period + 1 {
        return None;
    }
    let tr = true_ranges(bars);

    // Seed: simple average of the first window, then recursive blend.
    let seed: f64 = tr[..period].iter().sum::<f64>() / period as f64;
    let alpha = 1.0 / period as f64;
    let mut value = seed;
    for &t in &tr[period..] {
        value = alpha * t + (1.0 - alpha) * value;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::testing::{assert_approx, make_ohlc_bars, DEFAULT_EPSILON};

    #[test]
    fn atr_needs_period_plus_one_bars() {
        let bars = make_ohlc_bars(&[
            (100.0, 105.0, 95.0, 102.0),
            (102.0, 108.0, 100.0, 106.0),
            (106.0, 107.0, 98.0, 99.0),
        ]);
        assert!(atr(&bars, 3).is_none());
        assert!(atr(&bars, 2).is_some());
        assert!(atr(&bars, 0).is_none());
    }

    #[test]
    fn atr_seed_and_blend() {
        let bars = make_ohlc_bars(&[
            (100.0, 105.0, 95.0, 102.0),  // anchor only
            (102.0, 108.0, 100.0, 106.0), // TR = max(8, 6, 2) = 8
            (106.0, 107.0, 98.0, 99.0),   // TR = max(9, 1, 8) = 9
            (99.0, 103.0, 97.0, 101.0),   // TR = max(6, 4, 2) = 6
            (101.0, 106.0, 100.0, 105.0), // TR = max(6, 5, 1) = 6
        ]);
        // period 3: seed = mean(8, 9, 6) = 23/3
        // next: (1/3)*6 + (2/3)*(23/3) = 64/9
        assert_approx(atr(&bars, 3).unwrap(), 64.0 / 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_captures_gaps() {
        // Gap up: prev close 100, bar 110-115-108 → TR = 15.
        let bars = make_ohlc_bars(&[
            (98.0, 102.0, 97.0, 100.0),
            (110.0, 115.0, 108.0, 112.0),
        ]);
        assert_approx(atr(&bars, 1).unwrap(), 15.0, DEFAULT_EPSILON);
    }
}

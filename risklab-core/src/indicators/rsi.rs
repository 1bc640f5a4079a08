//! Relative Strength Index (RSI).
//!
//! Canonical recursive smoothing: average gains and losses are seeded with
//! the simple average over the first `period` changes, then blended with
//! Wilder's alpha = 1/period. RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! Edge cases: avg_loss == 0 → 100; avg_gain == 0 → 0; no movement → 50.

/// Latest RSI over a close series, or `None` when fewer than `period + 1`
/// closes are available or the period is zero.
pub fn rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    let changes: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for &ch in &changes[..period] {
        if ch > 0.0 {
            avg_gain += ch;
        } else {
            avg_loss -= ch;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;

    let alpha = 1.0 / period as f64;
    for &ch in &changes[period..] {
        let gain = if ch > 0.0 { ch } else { 0.0 };
        let loss = if ch < 0.0 { -ch } else { 0.0 };
        avg_gain = alpha * gain + (1.0 - alpha) * avg_gain;
        avg_loss = alpha * loss + (1.0 - alpha) * avg_loss;
    }

    Some(rsi_from_averages(avg_gain, avg_loss))
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::testing::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn rsi_all_gains_is_100() {
        let closes = [100.0, 101.0, 102.0, 103.0, 104.0];
        assert_approx(rsi(&closes, 3).unwrap(), 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let closes = [104.0, 103.0, 102.0, 101.0, 100.0];
        assert_approx(rsi(&closes, 3).unwrap(), 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_flat_series_is_50() {
        let closes = [100.0, 100.0, 100.0, 100.0];
        assert_approx(rsi(&closes, 3).unwrap(), 50.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_seed_window_value() {
        // Changes: +0.34, -0.25, -0.48 → avg_gain 0.34/3, avg_loss 0.73/3
        // RSI = 100 - 100 / (1 + 0.34/0.73)
        let closes = [44.0, 44.34, 44.09, 43.61];
        let expected = 100.0 - 100.0 / (1.0 + 0.34 / 0.73);
        assert_approx(rsi(&closes, 3).unwrap(), expected, 1e-6);
    }

    #[test]
    fn rsi_stays_in_bounds() {
        let closes = [100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0];
        for period in 1..6 {
            if let Some(v) = rsi(&closes, period) {
                assert!((0.0..=100.0).contains(&v), "RSI out of bounds: {v}");
            }
        }
    }

    #[test]
    fn rsi_insufficient_data_is_none() {
        assert_eq!(rsi(&[100.0, 101.0], 3), None);
        assert_eq!(rsi(&[100.0], 0), None);
    }
}

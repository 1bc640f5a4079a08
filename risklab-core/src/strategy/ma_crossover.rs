//! Moving-average crossover: fast SMA crossing the slow SMA.

use super::{Signal, SignalAction, Strategy};
use crate::domain::Bar;
use crate::indicators::sma;

/// Buy when the fast SMA crosses above the slow SMA, sell on the cross
/// below. Confidence grows with the post-cross separation.
#[derive(Debug, Clone)]
pub struct MaCrossover {
    fast: usize,
    slow: usize,
    name: String,
}

impl MaCrossover {
    pub fn new(fast: usize, slow: usize) -> Self {
        assert!(fast >= 1 && slow > fast, "need slow > fast >= 1");
        Self {
            fast,
            slow,
            name: format!("ma_crossover_{fast}_{slow}"),
        }
    }
}

impl Strategy for MaCrossover {
    fn name(&self) -> &str {
        &self.name
    }

    fn warmup_bars(&self) -> usize {
        // One extra bar so the previous-bar averages exist.
        self.slow + 1
    }

    fn evaluate(&self, bars: &[Bar]) -> Signal {
        if bars.len() <= self.warmup_bars() {
            return Signal::hold("warm-up");
        }
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let prev = &closes[..closes.len() - 1];

        let (Some(fast_now), Some(slow_now), Some(fast_prev), Some(slow_prev)) = (
            sma(&closes, self.fast),
            sma(&closes, self.slow),
            sma(prev, self.fast),
            sma(prev, self.slow),
        ) else {
            return Signal::hold("warm-up");
        };

        let crossed_up = fast_prev <= slow_prev && fast_now > slow_now;
        let crossed_down = fast_prev >= slow_prev && fast_now < slow_now;
        if !crossed_up && !crossed_down {
            return Signal::hold("no crossover");
        }

        let separation = if slow_now > 0.0 {
            ((fast_now - slow_now) / slow_now).abs()
        } else {
            0.0
        };
        // 1% separation saturates the confidence scale.
        let confidence = 60.0 + (separation / 0.01 * 40.0).min(40.0);

        let (action, reason) = if crossed_up {
            (SignalAction::Buy, "fast SMA crossed above slow SMA")
        } else {
            (SignalAction::Sell, "fast SMA crossed below slow SMA")
        };
        Signal {
            action,
            confidence,
            reason: reason.into(),
        }
    }
}

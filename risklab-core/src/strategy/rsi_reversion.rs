//! RSI mean reversion: buy oversold, sell overbought.

use super::{Signal, SignalAction, Strategy};
use crate::domain::Bar;
use crate::indicators::rsi;

/// Buy when RSI drops below `oversold`, sell when it rises above
/// `overbought`. Confidence grows with the distance past the threshold.
#[derive(Debug, Clone)]
pub struct RsiReversion {
    period: usize,
    oversold: f64,
    overbought: f64,
    name: String,
}

impl RsiReversion {
    pub fn new(period: usize, oversold: f64, overbought: f64) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        assert!(
            oversold < overbought,
            "oversold threshold must be below overbought"
        );
        Self {
            period,
            oversold,
            overbought,
            name: format!("rsi_reversion_{period}"),
        }
    }
}

impl Strategy for RsiReversion {
    fn name(&self) -> &str {
        &self.name
    }

    fn warmup_bars(&self) -> usize {
        self.period + 1
    }

    fn evaluate(&self, bars: &[Bar]) -> Signal {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let Some(value) = rsi(&closes, self.period) else {
            return Signal::hold("warm-up");
        };

        if value <= self.oversold {
            let confidence = (60.0 + (self.oversold - value) * 2.0).min(100.0);
            Signal {
                action: SignalAction::Buy,
                confidence,
                reason: format!("RSI {value:.1} below oversold {:.1}", self.oversold),
            }
        } else if value >= self.overbought {
            let confidence = (60.0 + (value - self.overbought) * 2.0).min(100.0);
            Signal {
                action: SignalAction::Sell,
                confidence,
                reason: format!("RSI {value:.1} above overbought {:.1}", self.overbought),
            }
        } else {
            Signal::hold(format!("RSI {value:.1} in neutral band"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::testing::make_bars;

    #[test]
    fn holds_during_warmup() {
        let bars = make_bars(&[100.0, 101.0]);
        let strategy = RsiReversion::new(14, 30.0, 70.0);
        assert_eq!(strategy.evaluate(&bars).action, SignalAction::Hold);
    }

    #[test]
    fn buys_when_oversold() {
        // Strictly falling closes drive RSI to zero.
        let bars = make_bars(&[110.0, 108.0, 106.0, 104.0, 102.0, 100.0]);
        let strategy = RsiReversion::new(3, 30.0, 70.0);
        let signal = strategy.evaluate(&bars);
        assert_eq!(signal.action, SignalAction::Buy);
        assert!(signal.confidence > 60.0);
    }

    #[test]
    fn sells_when_overbought() {
        let bars = make_bars(&[100.0, 102.0, 104.0, 106.0, 108.0, 110.0]);
        let strategy = RsiReversion::new(3, 30.0, 70.0);
        let signal = strategy.evaluate(&bars);
        assert_eq!(signal.action, SignalAction::Sell);
    }

    #[test]
    fn holds_in_neutral_band() {
        let bars = make_bars(&[100.0, 101.0, 99.0, 102.0, 98.0, 101.0, 100.0]);
        let strategy = RsiReversion::new(3, 10.0, 90.0);
        assert_eq!(strategy.evaluate(&bars).action, SignalAction::Hold);
    }
}

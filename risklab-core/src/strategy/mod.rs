//! Strategy layer — signal generation over a bar window.
//!
//! Strategies are ledger-agnostic: `evaluate` sees only the bar window and
//! must be deterministic given the same window. The set of variants is
//! closed; `Composite` aggregates children rather than loading plugins.

pub mod composite;
pub mod ma_crossover;
pub mod rsi_reversion;

pub use composite::Composite;
pub use ma_crossover::MaCrossover;
pub use rsi_reversion::RsiReversion;

use crate::domain::{Bar, PositionSide};
use serde::{Deserialize, Serialize};

/// Directional intent of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalAction {
    Buy,
    Sell,
    Hold,
}

impl SignalAction {
    /// Position direction this action opens, if any.
    pub fn position_side(self) -> Option<PositionSide> {
        match self {
            SignalAction::Buy => Some(PositionSide::Long),
            SignalAction::Sell => Some(PositionSide::Short),
            SignalAction::Hold => None,
        }
    }
}

/// A strategy's verdict for the window ending at the current bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub action: SignalAction,
    /// Conviction on a 0–100 scale.
    pub confidence: f64,
    pub reason: String,
}

impl Signal {
    pub fn hold(reason: impl Into<String>) -> Self {
        Self {
            action: SignalAction::Hold,
            confidence: 0.0,
            reason: reason.into(),
        }
    }
}

/// Trait for strategy variants.
///
/// # Architecture invariant
/// Implementations never see ledger or risk state. `evaluate` receives only
/// `bars[0..=current]` and must be deterministic in that window. During
/// warm-up (`bars.len() <= warmup_bars()`) the result is a Hold, never an
/// error.
pub trait Strategy: Send + Sync {
    /// Human-readable name (e.g. "ma_crossover").
    fn name(&self) -> &str;

    /// Number of bars needed before this strategy can produce output.
    fn warmup_bars(&self) -> usize;

    /// Evaluate the window ending at the last bar of `bars`.
    fn evaluate(&self, bars: &[Bar]) -> Signal;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_constructor() {
        let signal = Signal::hold("warm-up");
        assert_eq!(signal.action, SignalAction::Hold);
        assert_eq!(signal.confidence, 0.0);
        assert_eq!(signal.reason, "warm-up");
    }

    #[test]
    fn action_maps_to_position_side() {
        assert_eq!(SignalAction::Buy.position_side(), Some(PositionSide::Long));
        assert_eq!(SignalAction::Sell.position_side(), Some(PositionSide::Short));
        assert_eq!(SignalAction::Hold.position_side(), None);
    }
}

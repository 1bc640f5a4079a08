//! Composite strategy — aggregates a fixed set of child strategies.

use super::{Signal, SignalAction, Strategy};
use crate::domain::Bar;

/// Majority vote over child verdicts.
///
/// The winning direction needs strictly more votes than the other; the
/// confidence is the mean over the agreeing children. A tie (including
/// all-Hold) yields Hold.
pub struct Composite {
    children: Vec<Box<dyn Strategy>>,
    name: String,
}

impl Composite {
    pub fn new(children: Vec<Box<dyn Strategy>>) -> Self {
        assert!(!children.is_empty(), "composite needs at least one child");
        let name = format!("composite_{}", children.len());
        Self { children, name }
    }
}

impl Strategy for Composite {
    fn name(&self) -> &str {
        &self.name
    }

    fn warmup_bars(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.warmup_bars())
            .max()
            .unwrap_or(0)
    }

    fn evaluate(&self, bars: &[Bar]) -> Signal {
        let verdicts: Vec<Signal> = self.children.iter().map(|c| c.evaluate(bars)).collect();

        let buys: Vec<&Signal> = verdicts
            .iter()
            .filter(|s| s.action == SignalAction::Buy)
            .collect();
        let sells: Vec<&Signal> = verdicts
            .iter()
            .filter(|s| s.action == SignalAction::Sell)
            .collect();

        let (action, agreeing) = if buys.len() > sells.len() {
            (SignalAction::Buy, buys)
        } else if sells.len() > buys.len() {
            (SignalAction::Sell, sells)
        } else {
            return Signal::hold("no majority among children");
        };

        let confidence =
            agreeing.iter().map(|s| s.confidence).sum::<f64>() / agreeing.len() as f64;
        let reason = format!(
            "{} of {} children agree",
            agreeing.len(),
            self.children.len()
        );
        Signal {
            action,
            confidence,
            reason,
        }
    }
}

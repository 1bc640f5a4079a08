//! Run output — summary, trade history, equity curve, and skip records.

use crate::domain::{LedgerSummary, Trade};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an entry opportunity was skipped on a bar.
///
/// Skips are decisions, not errors; they are accumulated as structured
/// records instead of being logged or surfaced as failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    Halted,
    MaxPositions,
    LowConfidence,
    RiskReward,
    ZeroSize,
    InsufficientBalance,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::Halted => "halted",
            SkipReason::MaxPositions => "max positions",
            SkipReason::LowConfidence => "low confidence",
            SkipReason::RiskReward => "risk/reward",
            SkipReason::ZeroSize => "zero size",
            SkipReason::InsufficientBalance => "insufficient balance",
        };
        write!(f, "{s}")
    }
}

/// A skipped entry decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedEntry {
    pub bar_index: usize,
    pub timestamp: DateTime<Utc>,
    pub reason: SkipReason,
    pub detail: String,
}

/// Result of one complete simulation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    pub summary: LedgerSummary,
    /// Ordered trade history, partial-take rows included.
    pub trades: Vec<Trade>,
    /// Equity marked at each bar close.
    pub equity_curve: Vec<f64>,
    /// Entry decisions that did not result in an open.
    pub skipped: Vec<SkippedEntry>,
    pub final_balance: f64,
    pub bar_count: usize,
    pub warmup_bars: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_reason_display() {
        assert_eq!(SkipReason::RiskReward.to_string(), "risk/reward");
        assert_eq!(SkipReason::Halted.to_string(), "halted");
    }
}

//! Mutable risk bookkeeping: same-day P&L, peak equity, and halts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why new entries are suspended. Exits are always permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HaltReason {
    /// Same-day realized loss breached the daily limit. Cleared at rollover.
    DailyLoss,
    /// Equity fell too far from its peak. Survives rollovers.
    MaxDrawdown,
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HaltReason::DailyLoss => write!(f, "daily_loss"),
            HaltReason::MaxDrawdown => write!(f, "max_drawdown"),
        }
    }
}

/// Risk bookkeeping that evolves as realized P&L is recorded.
#[derive(Debug, Clone)]
pub struct RiskState {
    /// Accumulated realized P&L for the current day.
    pub daily_pnl: f64,
    /// Day marker; `None` until the first bar is seen.
    pub current_day: Option<NaiveDate>,
    /// Highest equity observed; ratchets up only.
    pub peak_equity: f64,
    pub halt: Option<HaltReason>,
}

impl RiskState {
    pub fn new(initial_equity: f64) -> Self {
        Self {
            daily_pnl: 0.0,
            current_day: None,
            peak_equity: initial_equity,
            halt: None,
        }
    }

    pub fn is_halted(&self) -> bool {
        self.halt.is_some()
    }
}

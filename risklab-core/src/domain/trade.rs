//! Trade — the closed, realized record of a former position.

use super::ids::PositionId;
use super::position::PositionSide;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a position (or part of one) was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitReason {
    StopLoss,
    TakeProfit,
    TrailingStop,
    /// Holding-period timeout.
    Stale,
    /// Profit-taking tier; the parent position stays open.
    PartialTake,
    EndOfSimulation,
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExitReason::StopLoss => "stop loss",
            ExitReason::TakeProfit => "take profit",
            ExitReason::TrailingStop => "trailing stop",
            ExitReason::Stale => "stale",
            ExitReason::PartialTake => "partial take",
            ExitReason::EndOfSimulation => "end of simulation",
        };
        write!(f, "{s}")
    }
}

/// A realized trade record: entry terms plus exit outcome.
///
/// Immutable after creation; appended to the ledger's ordered history.
/// A `PartialTake` row records the closed half while the parent position
/// remains open under the same id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    // ── Entry ──
    pub position_id: PositionId,
    pub side: PositionSide,
    pub entry_price: f64,
    pub quantity: f64,
    pub entry_cost: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub trailing_stop: f64,
    pub entry_bar: usize,
    pub entry_time: DateTime<Utc>,

    // ── Exit ──
    pub exit_price: f64,
    pub exit_time: DateTime<Utc>,
    pub exit_reason: ExitReason,

    // ── PnL ──
    pub pnl: f64,
    /// `pnl / entry_cost * 100`; zero when entry cost is zero.
    pub pnl_pct: f64,
}

impl Trade {
    pub fn is_winner(&self) -> bool {
        self.pnl > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_trade() -> Trade {
        let entry = Utc.with_ymd_and_hms(2024, 1, 2, 15, 0, 0).unwrap();
        Trade {
            position_id: PositionId(3),
            side: PositionSide::Long,
            entry_price: 100.0,
            quantity: 10.0,
            entry_cost: 1000.0,
            stop_loss: 98.0,
            take_profit: 104.0,
            trailing_stop: 99.0,
            entry_bar: 4,
            entry_time: entry,
            exit_price: 102.0,
            exit_time: entry + chrono::Duration::hours(6),
            exit_reason: ExitReason::TakeProfit,
            pnl: 20.0,
            pnl_pct: 2.0,
        }
    }

    #[test]
    fn is_winner() {
        assert!(sample_trade().is_winner());
        let mut loser = sample_trade();
        loser.pnl = -5.0;
        assert!(!loser.is_winner());
    }

    #[test]
    fn exit_reason_display() {
        assert_eq!(ExitReason::Stale.to_string(), "stale");
        assert_eq!(ExitReason::EndOfSimulation.to_string(), "end of simulation");
    }

    #[test]
    fn trade_serialization_roundtrip() {
        let trade = sample_trade();
        let json = serde_json::to_string(&trade).unwrap();
        let deser: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(trade.position_id, deser.position_id);
        assert_eq!(trade.pnl, deser.pnl);
        assert_eq!(trade.exit_reason, deser.exit_reason);
    }
}

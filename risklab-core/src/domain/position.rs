//! Position — an open, unrealized exposure with entry terms and protective levels.

use super::ids::PositionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of an open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    /// Order side that opens a position of this direction.
    pub fn entry_order(self) -> OrderSide {
        match self {
            PositionSide::Long => OrderSide::Buy,
            PositionSide::Short => OrderSide::Sell,
        }
    }

    /// Order side that closes a position of this direction.
    pub fn exit_order(self) -> OrderSide {
        match self {
            PositionSide::Long => OrderSide::Sell,
            PositionSide::Short => OrderSide::Buy,
        }
    }
}

/// Side of a market order, as seen by an execution venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

/// An open position. Owned exclusively by the ledger; callers receive clones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    pub side: PositionSide,
    pub entry_price: f64,
    pub quantity: f64,
    /// `entry_price * quantity` at open; halved by a partial close.
    pub entry_cost: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    /// Starts at `stop_loss`; ratchets in the favorable direction only.
    pub trailing_stop: f64,
    /// Bar index at entry, for holding-period timeouts.
    pub entry_bar: usize,
    pub entry_time: DateTime<Utc>,
    /// Whether the profit-taking tier has already fired.
    pub partial_taken: bool,
}

impl Position {
    /// Unrealized P&L at a given mark price.
    pub fn unrealized_pnl(&self, mark: f64) -> f64 {
        match self.side {
            PositionSide::Long => (mark - self.entry_price) * self.quantity,
            PositionSide::Short => (self.entry_price - mark) * self.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_position(side: PositionSide) -> Position {
        Position {
            id: PositionId(1),
            side,
            entry_price: 100.0,
            quantity: 10.0,
            entry_cost: 1000.0,
            stop_loss: 98.0,
            take_profit: 104.0,
            trailing_stop: 98.0,
            entry_bar: 5,
            entry_time: Utc.with_ymd_and_hms(2024, 1, 2, 15, 0, 0).unwrap(),
            partial_taken: false,
        }
    }

    #[test]
    fn long_unrealized_pnl() {
        let pos = sample_position(PositionSide::Long);
        assert_eq!(pos.unrealized_pnl(102.0), 20.0);
        assert_eq!(pos.unrealized_pnl(98.0), -20.0);
    }

    #[test]
    fn short_unrealized_pnl() {
        let pos = sample_position(PositionSide::Short);
        assert_eq!(pos.unrealized_pnl(102.0), -20.0);
        assert_eq!(pos.unrealized_pnl(98.0), 20.0);
    }

    #[test]
    fn order_sides() {
        assert_eq!(PositionSide::Long.entry_order(), OrderSide::Buy);
        assert_eq!(PositionSide::Long.exit_order(), OrderSide::Sell);
        assert_eq!(PositionSide::Short.entry_order(), OrderSide::Sell);
        assert_eq!(PositionSide::Short.exit_order(), OrderSide::Buy);
    }
}

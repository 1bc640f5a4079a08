//! PositionLedger — cash balance, open positions, and trade history.
//!
//! Every mutation is atomic: validation happens before any state write, so a
//! rejected operation never leaves partial state. Positions are owned
//! exclusively by the ledger; callers receive clones.

use super::bar::Bar;
use super::ids::{IdGen, PositionId};
use super::position::{Position, PositionSide};
use super::summary::LedgerSummary;
use super::trade::{ExitReason, Trade};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use thiserror::Error;

/// Errors from ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("insufficient balance: need {required:.2}, have {available:.2}")]
    InsufficientBalance { required: f64, available: f64 },

    #[error("position {0} not found")]
    NotFound(PositionId),
}

/// Cash, open positions, and the ordered trade history for one run.
#[derive(Debug, Clone)]
pub struct PositionLedger {
    balance: f64,
    initial_balance: f64,
    positions: HashMap<PositionId, Position>,
    trades: Vec<Trade>,
    ids: IdGen,
}

impl PositionLedger {
    pub fn new(initial_balance: f64) -> Self {
        Self {
            balance: initial_balance,
            initial_balance,
            positions: HashMap::new(),
            trades: Vec::new(),
            ids: IdGen::default(),
        }
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn initial_balance(&self) -> f64 {
        self.initial_balance
    }

    pub fn open_count(&self) -> usize {
        self.positions.len()
    }

    /// Open position ids in ascending order, for deterministic iteration.
    pub fn open_ids(&self) -> Vec<PositionId> {
        let mut ids: Vec<PositionId> = self.positions.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn position(&self, id: PositionId) -> Option<&Position> {
        self.positions.get(&id)
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Open a new position, debiting the entry cost from the balance.
    ///
    /// The trailing stop starts at the stop-loss level. Rejects with
    /// `InsufficientBalance` before any mutation when the entry cost exceeds
    /// the available balance.
    #[allow(clippy::too_many_arguments)]
    pub fn open(
        &mut self,
        side: PositionSide,
        entry_price: f64,
        quantity: f64,
        stop_loss: f64,
        take_profit: f64,
        entry_bar: usize,
        entry_time: DateTime<Utc>,
    ) -> Result<Position, LedgerError> {
        let entry_cost = entry_price * quantity;
        if entry_cost > self.balance {
            return Err(LedgerError::InsufficientBalance {
                required: entry_cost,
                available: self.balance,
            });
        }

        self.balance -= entry_cost;
        let id = self.ids.next_id();
        let position = Position {
            id,
            side,
            entry_price,
            quantity,
            entry_cost,
            stop_loss,
            take_profit,
            trailing_stop: stop_loss,
            entry_bar,
            entry_time,
            partial_taken: false,
        };
        self.positions.insert(id, position.clone());
        Ok(position)
    }

    /// Close an open position in full, crediting `entry_cost + pnl`.
    ///
    /// Rejects with `NotFound` (no mutation) when the id is unknown.
    pub fn close(
        &mut self,
        id: PositionId,
        exit_price: f64,
        exit_time: DateTime<Utc>,
        reason: ExitReason,
    ) -> Result<Trade, LedgerError> {
        let position = self
            .positions
            .remove(&id)
            .ok_or(LedgerError::NotFound(id))?;

        let pnl = realized_pnl(position.side, position.entry_price, exit_price, position.quantity);
        self.balance += position.entry_cost + pnl;

        let trade = make_trade(&position, exit_price, exit_time, reason, pnl);
        self.trades.push(trade.clone());
        Ok(trade)
    }

    /// Profit-taking tier: close half the quantity at the given price.
    ///
    /// Credits half the entry cost plus the partial P&L, halves the remaining
    /// quantity and notional, marks the partial-exit flag, and tightens both
    /// the stop-loss and the trailing stop to breakeven (ratcheted, never
    /// loosened). Records a `PartialTake` trade row; the position stays open.
    pub fn partial_close(
        &mut self,
        id: PositionId,
        exit_price: f64,
        exit_time: DateTime<Utc>,
    ) -> Result<Trade, LedgerError> {
        let position = self.positions.get_mut(&id).ok_or(LedgerError::NotFound(id))?;

        let half_qty = position.quantity / 2.0;
        let half_cost = position.entry_cost / 2.0;
        let pnl = realized_pnl(position.side, position.entry_price, exit_price, half_qty);
        self.balance += half_cost + pnl;

        // Snapshot of the closed half before mutating the remainder.
        let mut closed = position.clone();
        closed.quantity = half_qty;
        closed.entry_cost = half_cost;

        position.quantity = half_qty;
        position.entry_cost = half_cost;
        position.partial_taken = true;
        let breakeven = position.entry_price;
        match position.side {
            PositionSide::Long => {
                position.stop_loss = position.stop_loss.max(breakeven);
                position.trailing_stop = position.trailing_stop.max(breakeven);
            }
            PositionSide::Short => {
                position.stop_loss = position.stop_loss.min(breakeven);
                position.trailing_stop = position.trailing_stop.min(breakeven);
            }
        }

        let trade = make_trade(&closed, exit_price, exit_time, ExitReason::PartialTake, pnl);
        self.trades.push(trade.clone());
        Ok(trade)
    }

    /// Whether the profit-taking tier is due for a position at a mark price.
    ///
    /// Fires once per position, when the unrealized gain per unit reaches
    /// half the configured take-profit distance.
    pub fn partial_take_due(position: &Position, price: f64, take_profit_pct: f64) -> bool {
        if position.partial_taken || take_profit_pct <= 0.0 {
            return false;
        }
        let required = position.entry_price * take_profit_pct * 0.5;
        let gain = match position.side {
            PositionSide::Long => price - position.entry_price,
            PositionSide::Short => position.entry_price - price,
        };
        gain >= required
    }

    /// Move a position's trailing stop toward the proposed level.
    ///
    /// The ratchet only tightens: long stops rise, short stops fall. Returns
    /// the trailing stop in effect after the update.
    pub fn ratchet_trailing(
        &mut self,
        id: PositionId,
        proposed: f64,
    ) -> Result<f64, LedgerError> {
        let position = self.positions.get_mut(&id).ok_or(LedgerError::NotFound(id))?;
        position.trailing_stop = match position.side {
            PositionSide::Long => position.trailing_stop.max(proposed),
            PositionSide::Short => position.trailing_stop.min(proposed),
        };
        Ok(position.trailing_stop)
    }

    /// Total equity at a single mark price:
    /// `balance + sum(entry_cost + unrealized pnl)` over open positions.
    pub fn equity(&self, mark: f64) -> f64 {
        let open_value: f64 = self
            .positions
            .values()
            .map(|p| p.entry_cost + p.unrealized_pnl(mark))
            .sum();
        self.balance + open_value
    }

    /// Equity marked at the close of the given bar.
    pub fn equity_at(&self, bar: &Bar) -> f64 {
        self.equity(bar.close)
    }

    /// Summary statistics over the realized trade history.
    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary::compute(&self.trades, self.initial_balance)
    }
}

fn realized_pnl(side: PositionSide, entry: f64, exit: f64, quantity: f64) -> f64 {
    match side {
        PositionSide::Long => (exit - entry) * quantity,
        PositionSide::Short => (entry - exit) * quantity,
    }
}

fn make_trade(
    position: &Position,
    exit_price: f64,
    exit_time: DateTime<Utc>,
    reason: ExitReason,
    pnl: f64,
) -> Trade {
    let pnl_pct = if position.entry_cost > 0.0 {
        pnl / position.entry_cost * 100.0
    } else {
        0.0
    };
    Trade {
        position_id: position.id,
        side: position.side,
        entry_price: position.entry_price,
        quantity: position.quantity,
        entry_cost: position.entry_cost,
        stop_loss: position.stop_loss,
        take_profit: position.take_profit,
        trailing_stop: position.trailing_stop,
        entry_bar: position.entry_bar,
        entry_time: position.entry_time,
        exit_price,
        exit_time,
        exit_reason: reason,
        pnl,
        pnl_pct,
    }
}

//! Summary statistics — pure functions over the realized trade history.
//!
//! Every statistic is a pure function: trade list in, scalar out. Partial
//! rows count as trades. Max drawdown replays the realized P&L sequence
//! against a running peak starting at the initial balance.

use super::trade::Trade;
use serde::{Deserialize, Serialize};

/// Aggregate performance statistics for one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Realized return vs. the initial balance, in percent.
    pub total_return_pct: f64,
    pub trade_count: usize,
    pub win_rate: f64,
    /// Gross wins / gross losses. `f64::INFINITY` with wins and no losses;
    /// 0.0 with no trades.
    pub profit_factor: f64,
    /// Worst peak-to-trough decline of the replayed balance, in percent.
    pub max_drawdown_pct: f64,
    pub avg_win: f64,
    /// Mean of losing trade P&L; zero or negative.
    pub avg_loss: f64,
}

impl LedgerSummary {
    pub fn compute(trades: &[Trade], initial_balance: f64) -> Self {
        Self {
            total_return_pct: total_return_pct(trades, initial_balance),
            trade_count: trades.len(),
            win_rate: win_rate(trades),
            profit_factor: profit_factor(trades),
            max_drawdown_pct: max_drawdown_pct(trades, initial_balance),
            avg_win: avg_win(trades),
            avg_loss: avg_loss(trades),
        }
    }
}

pub fn total_return_pct(trades: &[Trade], initial_balance: f64) -> f64 {
    if initial_balance <= 0.0 {
        return 0.0;
    }
    let total_pnl: f64 = trades.iter().map(|t| t.pnl).sum();
    total_pnl / initial_balance * 100.0
}

/// Fraction of trades with positive P&L. Zero when there are no trades.
pub fn win_rate(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let wins = trades.iter().filter(|t| t.is_winner()).count();
    wins as f64 / trades.len() as f64
}

pub fn profit_factor(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let gross_wins: f64 = trades.iter().filter(|t| t.pnl > 0.0).map(|t| t.pnl).sum();
    let gross_losses: f64 = trades.iter().filter(|t| t.pnl < 0.0).map(|t| -t.pnl).sum();
    if gross_losses == 0.0 {
        if gross_wins > 0.0 {
            f64::INFINITY
        } else {
            0.0
        }
    } else {
        gross_wins / gross_losses
    }
}

/// Replay the trade P&L sequence against a running peak from the initial
/// balance; returns the worst decline as a percentage in `[0, 100]`.
pub fn max_drawdown_pct(trades: &[Trade], initial_balance: f64) -> f64 {
    if initial_balance <= 0.0 {
        return 0.0;
    }
    let mut balance = initial_balance;
    let mut peak = initial_balance;
    let mut max_dd = 0.0_f64;
    for trade in trades {
        balance += trade.pnl;
        if balance > peak {
            peak = balance;
        }
        if peak > 0.0 {
            let dd = (peak - balance) / peak * 100.0;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd.clamp(0.0, 100.0)
}

pub fn avg_win(trades: &[Trade]) -> f64 {
    let wins: Vec<f64> = trades.iter().filter(|t| t.pnl > 0.0).map(|t| t.pnl).collect();
    if wins.is_empty() {
        0.0
    } else {
        wins.iter().sum::<f64>() / wins.len() as f64
    }
}

pub fn avg_loss(trades: &[Trade]) -> f64 {
    let losses: Vec<f64> = trades.iter().filter(|t| t.pnl < 0.0).map(|t| t.pnl).collect();
    if losses.is_empty() {
        0.0
    } else {
        losses.iter().sum::<f64>() / losses.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExitReason, PositionId, PositionSide};
    use chrono::{TimeZone, Utc};

    fn trade_with_pnl(pnl: f64) -> Trade {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 15, 0, 0).unwrap();
        Trade {
            position_id: PositionId(1),
            side: PositionSide::Long,
            entry_price: 100.0,
            quantity: 10.0,
            entry_cost: 1000.0,
            stop_loss: 98.0,
            take_profit: 104.0,
            trailing_stop: 98.0,
            entry_bar: 0,
            entry_time: ts,
            exit_price: 100.0 + pnl / 10.0,
            exit_time: ts,
            exit_reason: ExitReason::TakeProfit,
            pnl,
            pnl_pct: pnl / 10.0,
        }
    }

    #[test]
    fn empty_history_is_all_zero() {
        let summary = LedgerSummary::compute(&[], 10_000.0);
        assert_eq!(summary.trade_count, 0);
        assert_eq!(summary.win_rate, 0.0);
        assert_eq!(summary.profit_factor, 0.0);
        assert_eq!(summary.max_drawdown_pct, 0.0);
    }

    #[test]
    fn win_rate_and_averages() {
        let trades = vec![trade_with_pnl(30.0), trade_with_pnl(-10.0), trade_with_pnl(10.0)];
        let summary = LedgerSummary::compute(&trades, 10_000.0);
        assert!((summary.win_rate - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(summary.avg_win, 20.0);
        assert_eq!(summary.avg_loss, -10.0);
        assert!((summary.total_return_pct - 0.3).abs() < 1e-12);
    }

    #[test]
    fn profit_factor_unbounded_without_losses() {
        let trades = vec![trade_with_pnl(30.0), trade_with_pnl(10.0)];
        assert!(profit_factor(&trades).is_infinite());
    }

    #[test]
    fn profit_factor_ratio() {
        let trades = vec![trade_with_pnl(30.0), trade_with_pnl(-15.0)];
        assert_eq!(profit_factor(&trades), 2.0);
    }

    #[test]
    fn max_drawdown_replay() {
        // 10_000 → +500 (peak 10_500) → -1_050 (9_450) → drawdown 10%.
        let trades = vec![trade_with_pnl(500.0), trade_with_pnl(-1_050.0)];
        assert!((max_drawdown_pct(&trades, 10_000.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn max_drawdown_bounded() {
        let trades = vec![trade_with_pnl(-20_000.0)];
        let dd = max_drawdown_pct(&trades, 10_000.0);
        assert!((0.0..=100.0).contains(&dd));
    }
}

//! RiskPolicy — the decision surface between signals and ledger mutations.
//!
//! Sizing scales inversely with recent volatility, protective levels are
//! fixed percentages of the entry, the trailing stop ratchets in the
//! favorable direction only, and halts suspend new entries while leaving
//! exits untouched.

use super::config::RiskConfig;
use super::state::{HaltReason, RiskState};
use crate::domain::{Bar, ExitReason, Position, PositionSide};
use crate::indicators::atr;
use chrono::{DateTime, Utc};
use std::fmt;

/// ATR period used by volatility-scaled sizing.
const SIZING_ATR_PERIOD: usize = 14;
/// Baseline ATR-to-price ratio considered "normal" volatility.
const BASELINE_ATR_RATIO: f64 = 0.015;
/// Hard cap on notional per position, as a fraction of the balance.
const MAX_NOTIONAL_PCT: f64 = 0.25;

/// Why an admission check refused a new entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRefusal {
    Halted(HaltReason),
    MaxPositions,
}

impl fmt::Display for EntryRefusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryRefusal::Halted(reason) => write!(f, "halted ({reason})"),
            EntryRefusal::MaxPositions => write!(f, "max open positions reached"),
        }
    }
}

/// Sizing, stop placement, halt bookkeeping, and entry admission.
#[derive(Debug, Clone)]
pub struct RiskPolicy {
    config: RiskConfig,
    state: RiskState,
    initial_balance: f64,
}

impl RiskPolicy {
    pub fn new(config: RiskConfig, initial_balance: f64) -> Self {
        Self {
            config,
            state: RiskState::new(initial_balance),
            initial_balance,
        }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    pub fn state(&self) -> &RiskState {
        &self.state
    }

    /// Volatility-scaled position size, in units of the instrument.
    ///
    /// Risk amount starts at `balance * max_position_size_pct`. When a
    /// 14-period ATR is available from `recent_bars`, the amount is scaled
    /// by `clamp(1/vol_ratio, 0.5, 1.5)` where
    /// `vol_ratio = (atr/price) / baseline`. The target notional
    /// `risk / stop_loss_pct` is capped at a quarter of the balance.
    /// Returns zero when the capped notional is non-positive.
    pub fn position_size(&self, balance: f64, price: f64, recent_bars: &[Bar]) -> f64 {
        if price <= 0.0 || balance <= 0.0 {
            return 0.0;
        }
        let mut risk_amount = balance * self.config.max_position_size_pct;

        if let Some(atr_value) = atr(recent_bars, SIZING_ATR_PERIOD) {
            let vol_ratio = (atr_value / price) / BASELINE_ATR_RATIO;
            if vol_ratio > 0.0 {
                risk_amount *= (1.0 / vol_ratio).clamp(0.5, 1.5);
            }
        }

        if self.config.stop_loss_pct <= 0.0 {
            return 0.0;
        }
        let notional = (risk_amount / self.config.stop_loss_pct).min(balance * MAX_NOTIONAL_PCT);
        if notional <= 0.0 {
            return 0.0;
        }
        notional / price
    }

    /// Stop-loss and take-profit prices for an entry.
    pub fn protective_levels(&self, entry: f64, side: PositionSide) -> (f64, f64) {
        match side {
            PositionSide::Long => (
                entry * (1.0 - self.config.stop_loss_pct),
                entry * (1.0 + self.config.take_profit_pct),
            ),
            PositionSide::Short => (
                entry * (1.0 + self.config.stop_loss_pct),
                entry * (1.0 - self.config.take_profit_pct),
            ),
        }
    }

    /// Trailing-stop candidate ratcheted against the current stop.
    ///
    /// Long stops only rise, short stops only fall.
    pub fn trail_stop(&self, current_stop: f64, price: f64, side: PositionSide) -> f64 {
        match side {
            PositionSide::Long => current_stop.max(price * (1.0 - self.config.trailing_stop_pct)),
            PositionSide::Short => current_stop.min(price * (1.0 + self.config.trailing_stop_pct)),
        }
    }

    pub fn trailing_enabled(&self) -> bool {
        self.config.trailing_stop_pct > 0.0
    }

    /// Reward/risk gate: absolute distances from entry to target and stop.
    /// Zero risk always fails.
    pub fn acceptable_risk_reward(&self, entry: f64, stop: f64, target: f64) -> bool {
        let risk = (entry - stop).abs();
        let reward = (target - entry).abs();
        if risk == 0.0 {
            return false;
        }
        reward / risk >= self.config.risk_reward_ratio
    }

    /// Stop-loss / take-profit breach check at a mark price.
    pub fn exit_breach(&self, position: &Position, price: f64) -> Option<ExitReason> {
        match position.side {
            PositionSide::Long => {
                if price <= position.stop_loss {
                    Some(ExitReason::StopLoss)
                } else if price >= position.take_profit {
                    Some(ExitReason::TakeProfit)
                } else {
                    None
                }
            }
            PositionSide::Short => {
                if price >= position.stop_loss {
                    Some(ExitReason::StopLoss)
                } else if price <= position.take_profit {
                    Some(ExitReason::TakeProfit)
                } else {
                    None
                }
            }
        }
    }

    /// Day-rollover bookkeeping.
    ///
    /// On a date-marker change: same-day P&L resets, peak equity resets to
    /// the current equity, and a `DailyLoss` halt clears. A `MaxDrawdown`
    /// halt persists across rollovers.
    pub fn roll_day(&mut self, now: DateTime<Utc>, equity: f64) {
        let today = now.date_naive();
        if self.state.current_day == Some(today) {
            return;
        }
        let is_rollover = self.state.current_day.is_some();
        self.state.current_day = Some(today);
        if is_rollover {
            self.state.daily_pnl = 0.0;
            self.state.peak_equity = equity;
            if self.state.halt == Some(HaltReason::DailyLoss) {
                self.state.halt = None;
            }
        }
    }

    /// Record realized P&L and re-evaluate halt conditions.
    ///
    /// Peak equity ratchets up only. Halts are sticky until cleared by the
    /// rollover rules in [`roll_day`](Self::roll_day).
    pub fn record_pnl(&mut self, pnl: f64, equity: f64) {
        self.state.daily_pnl += pnl;
        if equity > self.state.peak_equity {
            self.state.peak_equity = equity;
        }

        let daily_limit = -self.initial_balance * self.config.max_daily_loss_pct;
        if self.state.daily_pnl <= daily_limit && self.state.halt.is_none() {
            self.state.halt = Some(HaltReason::DailyLoss);
        }

        if self.state.peak_equity > 0.0 {
            let drawdown = (self.state.peak_equity - equity) / self.state.peak_equity;
            if drawdown >= self.config.max_drawdown_pct {
                self.state.halt = Some(HaltReason::MaxDrawdown);
            }
        }
    }

    /// Admission check for new entries. Exits bypass this entirely.
    pub fn can_open(&self, open_count: usize) -> Result<(), EntryRefusal> {
        if open_count >= self.config.max_open_positions {
            return Err(EntryRefusal::MaxPositions);
        }
        if let Some(reason) = self.state.halt {
            return Err(EntryRefusal::Halted(reason));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn policy(config: RiskConfig) -> RiskPolicy {
        RiskPolicy::new(config, 10_000.0)
    }

    fn day(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, h, 0, 0).unwrap()
    }

    #[test]
    fn sizing_without_atr_uses_base_risk() {
        let p = policy(RiskConfig {
            max_position_size_pct: 0.10,
            stop_loss_pct: 0.02,
            ..RiskConfig::default()
        });
        // risk = 1000, notional = 1000 / 0.02 = 50_000, capped at 2_500.
        let qty = p.position_size(10_000.0, 100.0, &[]);
        assert!((qty - 25.0).abs() < 1e-10);
    }

    #[test]
    fn sizing_zero_for_bad_inputs() {
        let p = policy(RiskConfig::default());
        assert_eq!(p.position_size(10_000.0, 0.0, &[]), 0.0);
        assert_eq!(p.position_size(0.0, 100.0, &[]), 0.0);
        let zero_stop = policy(RiskConfig {
            stop_loss_pct: 0.0,
            ..RiskConfig::default()
        });
        assert_eq!(zero_stop.position_size(10_000.0, 100.0, &[]), 0.0);
    }

    #[test]
    fn protective_levels_mirror_by_side() {
        let p = policy(RiskConfig {
            stop_loss_pct: 0.02,
            take_profit_pct: 0.04,
            ..RiskConfig::default()
        });
        let (stop, target) = p.protective_levels(100.0, PositionSide::Long);
        assert!((stop - 98.0).abs() < 1e-10);
        assert!((target - 104.0).abs() < 1e-10);
        assert!(stop < 100.0 && target > 100.0);

        let (stop, target) = p.protective_levels(100.0, PositionSide::Short);
        assert!((stop - 102.0).abs() < 1e-10);
        assert!((target - 96.0).abs() < 1e-10);
        assert!(stop > 100.0 && target < 100.0);
    }

    #[test]
    fn trail_stop_ratchets_only() {
        let p = policy(RiskConfig {
            trailing_stop_pct: 0.01,
            ..RiskConfig::default()
        });
        // Long: rises with price, never falls on a dip.
        let s1 = p.trail_stop(98.0, 102.0, PositionSide::Long);
        assert!((s1 - 100.98).abs() < 1e-10);
        let s2 = p.trail_stop(s1, 99.0, PositionSide::Long);
        assert_eq!(s2, s1);

        // Short: falls with price, never rises on a bounce.
        let s3 = p.trail_stop(102.0, 98.0, PositionSide::Short);
        assert!((s3 - 98.98).abs() < 1e-10);
        let s4 = p.trail_stop(s3, 101.0, PositionSide::Short);
        assert_eq!(s4, s3);
    }

    #[test]
    fn risk_reward_gate() {
        let p = policy(RiskConfig {
            risk_reward_ratio: 2.0,
            ..RiskConfig::default()
        });
        // Entry 100, stop 98 (risk 2), target 101 (reward 1): ratio 0.5.
        assert!(!p.acceptable_risk_reward(100.0, 98.0, 101.0));
        assert!(p.acceptable_risk_reward(100.0, 98.0, 104.0));
        // Zero risk always fails.
        assert!(!p.acceptable_risk_reward(100.0, 100.0, 110.0));
    }

    #[test]
    fn daily_loss_halt_sets_and_clears_at_rollover() {
        let mut p = policy(RiskConfig {
            max_daily_loss_pct: 0.03,
            ..RiskConfig::default()
        });
        p.roll_day(day(1, 9), 10_000.0);
        p.record_pnl(-350.0, 9_650.0);
        assert_eq!(p.state().halt, Some(HaltReason::DailyLoss));
        assert!(p.can_open(0).is_err());

        // Same day: still halted.
        p.roll_day(day(1, 15), 9_650.0);
        assert!(p.state().is_halted());

        // Next day: cleared, daily pnl reset.
        p.roll_day(day(2, 9), 9_650.0);
        assert!(!p.state().is_halted());
        assert_eq!(p.state().daily_pnl, 0.0);
        assert!(p.can_open(0).is_ok());
    }

    #[test]
    fn max_drawdown_halt_survives_rollover() {
        let mut p = policy(RiskConfig {
            max_drawdown_pct: 0.10,
            ..RiskConfig::default()
        });
        p.roll_day(day(1, 9), 10_000.0);
        p.record_pnl(-1_100.0, 8_900.0);
        assert_eq!(p.state().halt, Some(HaltReason::MaxDrawdown));

        p.roll_day(day(2, 9), 8_900.0);
        assert_eq!(p.state().halt, Some(HaltReason::MaxDrawdown));
        assert!(p.can_open(0).is_err());
    }

    #[test]
    fn peak_equity_ratchets_up_only() {
        let mut p = policy(RiskConfig::default());
        p.roll_day(day(1, 9), 10_000.0);
        p.record_pnl(200.0, 10_200.0);
        assert_eq!(p.state().peak_equity, 10_200.0);
        p.record_pnl(-100.0, 10_100.0);
        assert_eq!(p.state().peak_equity, 10_200.0);
    }

    #[test]
    fn can_open_refuses_at_position_cap_regardless_of_halt() {
        let p = policy(RiskConfig {
            max_open_positions: 2,
            ..RiskConfig::default()
        });
        assert!(p.can_open(1).is_ok());
        assert_eq!(p.can_open(2), Err(EntryRefusal::MaxPositions));
        assert_eq!(p.can_open(3), Err(EntryRefusal::MaxPositions));
    }

    #[test]
    fn exit_breach_long_and_short() {
        let p = policy(RiskConfig::default());
        let mut pos = Position {
            id: crate::domain::PositionId(1),
            side: PositionSide::Long,
            entry_price: 100.0,
            quantity: 10.0,
            entry_cost: 1000.0,
            stop_loss: 98.0,
            take_profit: 104.0,
            trailing_stop: 98.0,
            entry_bar: 0,
            entry_time: day(1, 9),
            partial_taken: false,
        };
        assert_eq!(p.exit_breach(&pos, 97.5), Some(ExitReason::StopLoss));
        assert_eq!(p.exit_breach(&pos, 104.5), Some(ExitReason::TakeProfit));
        assert_eq!(p.exit_breach(&pos, 101.0), None);

        pos.side = PositionSide::Short;
        pos.stop_loss = 102.0;
        pos.take_profit = 96.0;
        assert_eq!(p.exit_breach(&pos, 102.5), Some(ExitReason::StopLoss));
        assert_eq!(p.exit_breach(&pos, 95.0), Some(ExitReason::TakeProfit));
        assert_eq!(p.exit_breach(&pos, 99.0), None);
    }
}

//! Session — per-bar logic shared by the backtest loop and the live loop.
//!
//! A session owns a fresh ledger and risk policy; no state is shared across
//! independent runs. Exit precedence within a bar is fixed:
//! timeout → partial-take → trailing-stop → stop/take-profit, and at most
//! one full close happens per position per bar.

use super::fills::FillSource;
use super::report::{SkipReason, SkippedEntry};
use crate::domain::{Bar, ExitReason, LedgerError, PositionId, PositionLedger};
use crate::risk::{EntryRefusal, RiskConfig, RiskPolicy};
use crate::strategy::Strategy;

/// Mutable simulation state for one run: ledger plus risk policy.
pub struct Session {
    pub ledger: PositionLedger,
    pub policy: RiskPolicy,
}

impl Session {
    pub fn new(initial_balance: f64, risk: RiskConfig) -> Self {
        Self {
            ledger: PositionLedger::new(initial_balance),
            policy: RiskPolicy::new(risk, initial_balance),
        }
    }

    /// Process the bar at index `t` of `bars`: exits, rollover/halt
    /// bookkeeping, then entry evaluation. Returns the skip records for
    /// this bar. Exits always run, even when entries are refused.
    pub fn process_bar(
        &mut self,
        bars: &[Bar],
        t: usize,
        strategy: &dyn Strategy,
        fills: &mut dyn FillSource,
    ) -> Vec<SkippedEntry> {
        let bar = &bars[t];
        let mut skipped = Vec::new();

        self.run_exits(bar, t, fills);

        self.policy.roll_day(bar.timestamp, self.ledger.equity_at(bar));

        if let Err(refusal) = self.policy.can_open(self.ledger.open_count()) {
            let reason = match refusal {
                EntryRefusal::Halted(_) => SkipReason::Halted,
                EntryRefusal::MaxPositions => SkipReason::MaxPositions,
            };
            skipped.push(self.skip(t, bar, reason, refusal.to_string()));
            return skipped;
        }

        let signal = strategy.evaluate(&bars[..=t]);
        let Some(side) = signal.action.position_side() else {
            return skipped;
        };
        if signal.confidence < self.policy.config().min_confidence {
            skipped.push(self.skip(
                t,
                bar,
                SkipReason::LowConfidence,
                format!(
                    "confidence {:.1} below minimum {:.1}",
                    signal.confidence,
                    self.policy.config().min_confidence
                ),
            ));
            return skipped;
        }

        let quantity = self
            .policy
            .position_size(self.ledger.balance(), bar.close, &bars[..=t]);
        if quantity <= 0.0 {
            skipped.push(self.skip(t, bar, SkipReason::ZeroSize, "sizing returned zero".into()));
            return skipped;
        }

        let (stop, target) = self.policy.protective_levels(bar.close, side);
        if !self.policy.acceptable_risk_reward(bar.close, stop, target) {
            skipped.push(self.skip(
                t,
                bar,
                SkipReason::RiskReward,
                format!("entry {:.2} stop {stop:.2} target {target:.2}", bar.close),
            ));
            return skipped;
        }

        let fill = fills.entry_fill(bar.close, side, quantity);
        match self
            .ledger
            .open(side, fill, quantity, stop, target, t, bar.timestamp)
        {
            Ok(_) => {}
            Err(err @ LedgerError::InsufficientBalance { .. }) => {
                skipped.push(self.skip(t, bar, SkipReason::InsufficientBalance, err.to_string()));
            }
            Err(LedgerError::NotFound(_)) => unreachable!("open never reports NotFound"),
        }
        skipped
    }

    /// Force-close every remaining position at the final bar's close.
    pub fn close_all(&mut self, bar: &Bar, fills: &mut dyn FillSource) {
        for id in self.ledger.open_ids() {
            let Some(position) = self.ledger.position(id).cloned() else {
                continue;
            };
            let fill = fills.exit_fill(bar.close, position.side, position.quantity, false);
            self.close_and_record(id, fill, bar, ExitReason::EndOfSimulation);
        }
    }

    fn run_exits(&mut self, bar: &Bar, t: usize, fills: &mut dyn FillSource) {
        let price = bar.close;
        let max_bars = self.policy.config().max_bars_in_trade;
        let take_profit_pct = self.policy.config().take_profit_pct;

        for id in self.ledger.open_ids() {
            let Some(position) = self.ledger.position(id).cloned() else {
                continue;
            };

            // 1. Holding-period timeout.
            if max_bars > 0 && t.saturating_sub(position.entry_bar) >= max_bars {
                let fill = fills.exit_fill(price, position.side, position.quantity, false);
                self.close_and_record(id, fill, bar, ExitReason::Stale);
                continue;
            }

            // 2. Profit-taking tier (does not close the position).
            if PositionLedger::partial_take_due(&position, price, take_profit_pct) {
                let half = position.quantity / 2.0;
                let fill = fills.exit_fill(price, position.side, half, false);
                if let Ok(trade) = self.ledger.partial_close(id, fill, bar.timestamp) {
                    let equity = self.ledger.equity_at(bar);
                    self.policy.record_pnl(trade.pnl, equity);
                }
            }
            let Some(position) = self.ledger.position(id).cloned() else {
                continue;
            };

            // 3. Trailing-stop update, then breach check.
            if self.policy.trailing_enabled() {
                let proposed = self
                    .policy
                    .trail_stop(position.trailing_stop, price, position.side);
                let trailing = self
                    .ledger
                    .ratchet_trailing(id, proposed)
                    .unwrap_or(proposed);
                let breached = match position.side {
                    crate::domain::PositionSide::Long => price <= trailing,
                    crate::domain::PositionSide::Short => price >= trailing,
                };
                if breached {
                    let fill = fills.exit_fill(price, position.side, position.quantity, true);
                    self.close_and_record(id, fill, bar, ExitReason::TrailingStop);
                    continue;
                }
            }

            // 4. Stop-loss / take-profit breach.
            if let Some(reason) = self.policy.exit_breach(&position, price) {
                let is_stop = reason == ExitReason::StopLoss;
                let fill = fills.exit_fill(price, position.side, position.quantity, is_stop);
                self.close_and_record(id, fill, bar, reason);
            }
        }
    }

    fn close_and_record(&mut self, id: PositionId, fill: f64, bar: &Bar, reason: ExitReason) {
        if let Ok(trade) = self.ledger.close(id, fill, bar.timestamp, reason) {
            let equity = self.ledger.equity_at(bar);
            self.policy.record_pnl(trade.pnl, equity);
        }
    }

    fn skip(&self, t: usize, bar: &Bar, reason: SkipReason, detail: String) -> SkippedEntry {
        SkippedEntry {
            bar_index: t,
            timestamp: bar.timestamp,
            reason,
            detail,
        }
    }
}

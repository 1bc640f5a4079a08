//! Backtester — orchestrates one pass over a bar sequence.

use super::fills::ModelFills;
use super::report::BacktestReport;
use super::session::Session;
use crate::domain::Bar;
use crate::execution::CostModel;
use crate::risk::RiskConfig;
use crate::strategy::Strategy;

/// One-shot simulation runner. Each `run` owns a fresh session, so results
/// are independent and deterministic for the same inputs.
#[derive(Debug, Clone)]
pub struct Backtester {
    initial_balance: f64,
    warmup_bars: usize,
    risk: RiskConfig,
    costs: CostModel,
}

impl Backtester {
    pub fn new(initial_balance: f64, warmup_bars: usize, risk: RiskConfig, costs: CostModel) -> Self {
        Self {
            initial_balance,
            warmup_bars,
            risk,
            costs,
        }
    }

    /// Run the simulation over `bars` with the given strategy.
    ///
    /// The effective warm-up is the larger of the configured offset and the
    /// strategy's own requirement. After the last bar, every remaining open
    /// position is force-closed at the final close.
    pub fn run(&self, bars: &[Bar], strategy: &dyn Strategy) -> BacktestReport {
        let warmup = self.warmup_bars.max(strategy.warmup_bars());
        let mut session = Session::new(self.initial_balance, self.risk.clone());
        let mut fills = ModelFills::new(self.costs.clone());
        let mut equity_curve = Vec::with_capacity(bars.len());
        let mut skipped = Vec::new();

        for (t, bar) in bars.iter().enumerate() {
            if t >= warmup {
                skipped.extend(session.process_bar(bars, t, strategy, &mut fills));
            }
            equity_curve.push(session.ledger.equity_at(bar));
        }

        if let Some(last) = bars.last() {
            session.close_all(last, &mut fills);
            if let Some(eq) = equity_curve.last_mut() {
                *eq = session.ledger.equity_at(last);
            }
        }

        BacktestReport {
            summary: session.ledger.summary(),
            trades: session.ledger.trades().to_vec(),
            equity_curve,
            skipped,
            final_balance: session.ledger.balance(),
            bar_count: bars.len(),
            warmup_bars: warmup,
        }
    }
}

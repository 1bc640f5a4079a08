//! Fill source — the seam between the bar loop and fill pricing.
//!
//! Backtests price fills purely from the cost model. The live variant
//! substitutes a source that asks an execution client for the real fill
//! and falls back to the model price when no report is available.

use crate::domain::PositionSide;
use crate::execution::CostModel;

/// Produces fill prices for entries and exits.
///
/// `&mut self` because live implementations place orders; the model-backed
/// implementation is effectively pure.
pub trait FillSource {
    fn entry_fill(&mut self, nominal: f64, side: PositionSide, quantity: f64) -> f64;
    fn exit_fill(&mut self, nominal: f64, side: PositionSide, quantity: f64, is_stop: bool)
        -> f64;
}

/// Cost-model-backed fills for backtesting.
#[derive(Debug, Clone)]
pub struct ModelFills {
    costs: CostModel,
}

impl ModelFills {
    pub fn new(costs: CostModel) -> Self {
        Self { costs }
    }
}

impl FillSource for ModelFills {
    fn entry_fill(&mut self, nominal: f64, side: PositionSide, _quantity: f64) -> f64 {
        self.costs.entry_fill(nominal, side)
    }

    fn exit_fill(
        &mut self,
        nominal: f64,
        side: PositionSide,
        _quantity: f64,
        is_stop: bool,
    ) -> f64 {
        self.costs.exit_fill(nominal, side, is_stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_fills_delegate_to_cost_model() {
        let mut fills = ModelFills::new(CostModel::frictionless());
        assert_eq!(fills.entry_fill(100.0, PositionSide::Long, 10.0), 100.0);
        assert_eq!(fills.exit_fill(100.0, PositionSide::Short, 10.0, true), 100.0);
    }
}

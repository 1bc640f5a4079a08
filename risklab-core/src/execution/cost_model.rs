//! Cost model — slippage, half-spread, and commission in basis points.
//!
//! Costs are directional: the fill is always worse for the trader. A long
//! entry fills above the nominal price, a long exit below it; shorts are
//! mirrored. Stop fills carry an extra slippage penalty. Pure functions of
//! inputs and configured bps values; no side effects.

use crate::domain::PositionSide;
use serde::{Deserialize, Serialize};

/// Basis-point cost components applied to simulate real fill quality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    pub slippage_bps: f64,
    /// Full quoted spread; half is paid per fill.
    pub spread_bps: f64,
    pub commission_bps: f64,
    /// Additional penalty on stop fills.
    pub stop_slippage_bps: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            slippage_bps: 2.0,
            spread_bps: 2.0,
            commission_bps: 5.0,
            stop_slippage_bps: 5.0,
        }
    }
}

/// Converts a nominal price into a fill price given side and fill type.
#[derive(Debug, Clone)]
pub struct CostModel {
    config: CostConfig,
}

impl CostModel {
    pub fn new(config: CostConfig) -> Self {
        Self { config }
    }

    pub fn frictionless() -> Self {
        Self::new(CostConfig {
            slippage_bps: 0.0,
            spread_bps: 0.0,
            commission_bps: 0.0,
            stop_slippage_bps: 0.0,
        })
    }

    fn entry_bps(&self) -> f64 {
        self.config.slippage_bps + self.config.spread_bps / 2.0 + self.config.commission_bps
    }

    /// Fill price for opening a position: the nominal price marked against
    /// the trader by slippage + half-spread + commission.
    pub fn entry_fill(&self, nominal: f64, side: PositionSide) -> f64 {
        let frac = self.entry_bps() / 10_000.0;
        match side {
            PositionSide::Long => nominal * (1.0 + frac),
            PositionSide::Short => nominal * (1.0 - frac),
        }
    }

    /// Fill price for closing a position. `is_stop` adds the stop-fill
    /// penalty on top of the normal exit cost.
    pub fn exit_fill(&self, nominal: f64, side: PositionSide, is_stop: bool) -> f64 {
        let mut bps = self.entry_bps();
        if is_stop {
            bps += self.config.stop_slippage_bps;
        }
        let frac = bps / 10_000.0;
        match side {
            PositionSide::Long => nominal * (1.0 - frac),
            PositionSide::Short => nominal * (1.0 + frac),
        }
    }
}

//! Risk policy configuration.

use serde::{Deserialize, Serialize};

/// All recognized risk options. Percentages are fractions (0.02 = 2%)
/// except `min_confidence`, which shares the signal's 0–100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Fraction of the balance risked per position before volatility scaling.
    pub max_position_size_pct: f64,
    pub stop_loss_pct: f64,
    pub take_profit_pct: f64,
    /// Zero disables the trailing stop.
    pub trailing_stop_pct: f64,
    pub max_open_positions: usize,
    /// Same-day realized loss that triggers a `DailyLoss` halt.
    pub max_daily_loss_pct: f64,
    /// Peak-to-equity decline that triggers a `MaxDrawdown` halt.
    pub max_drawdown_pct: f64,
    /// Minimum reward/risk a new entry must offer.
    pub risk_reward_ratio: f64,
    /// Signals below this confidence are ignored.
    pub min_confidence: f64,
    /// Holding-period timeout in bars; zero disables it.
    pub max_bars_in_trade: usize,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            max_position_size_pct: 0.10,
            stop_loss_pct: 0.02,
            take_profit_pct: 0.04,
            trailing_stop_pct: 0.015,
            max_open_positions: 3,
            max_daily_loss_pct: 0.03,
            max_drawdown_pct: 0.20,
            risk_reward_ratio: 1.5,
            min_confidence: 60.0,
            max_bars_in_trade: 48,
        }
    }
}

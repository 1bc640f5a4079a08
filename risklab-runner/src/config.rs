//! Serializable run configuration.
//!
//! A `RunConfig` captures everything needed to reproduce a run: balance,
//! warm-up, risk limits, trading costs, and the strategy tree. Two runs
//! with identical configs share the same content-addressable `RunId`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use risklab_core::execution::CostConfig;
use risklab_core::risk::RiskConfig;
use risklab_core::strategy::{Composite, MaCrossover, RsiReversion, Strategy};

/// Unique identifier for a run (content-addressable hash).
pub type RunId = String;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything needed to reproduce a single run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    #[serde(default = "default_initial_balance")]
    pub initial_balance: f64,

    /// Bars to skip before the first entry evaluation.
    #[serde(default)]
    pub warmup_bars: usize,

    #[serde(default)]
    pub risk: RiskConfig,

    #[serde(default)]
    pub trading_costs: CostConfig,

    #[serde(default)]
    pub strategy: StrategyConfig,
}

fn default_initial_balance() -> f64 {
    10_000.0
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            initial_balance: default_initial_balance(),
            warmup_bars: 0,
            risk: RiskConfig::default(),
            trading_costs: CostConfig::default(),
            strategy: StrategyConfig::default(),
        }
    }
}

impl RunConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Computes a deterministic hash ID for this configuration.
    ///
    /// Two runs with identical configs produce the same `RunId`, so cached
    /// artifacts can be shared between them.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("RunConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_balance <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "initial_balance must be positive, got {}",
                self.initial_balance
            )));
        }
        self.strategy.validate()
    }
}

/// Strategy configuration (serializable enum).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyConfig {
    /// Fast MA crossing slow MA.
    MaCrossover { fast_period: usize, slow_period: usize },

    /// RSI mean reversion against oversold/overbought thresholds.
    RsiReversion {
        period: usize,
        oversold: f64,
        overbought: f64,
    },

    /// Majority vote over child strategies.
    Composite { children: Vec<StrategyConfig> },
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig::MaCrossover {
            fast_period: 10,
            slow_period: 30,
        }
    }
}

impl StrategyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            StrategyConfig::MaCrossover {
                fast_period,
                slow_period,
            } => {
                if *fast_period == 0 || fast_period >= slow_period {
                    return Err(ConfigError::Invalid(format!(
                        "MA crossover needs 0 < fast ({fast_period}) < slow ({slow_period})"
                    )));
                }
            }
            StrategyConfig::RsiReversion {
                period,
                oversold,
                overbought,
            } => {
                if *period == 0 || oversold >= overbought {
                    return Err(ConfigError::Invalid(format!(
                        "RSI reversion needs period > 0 and oversold ({oversold}) < overbought ({overbought})"
                    )));
                }
            }
            StrategyConfig::Composite { children } => {
                if children.is_empty() {
                    return Err(ConfigError::Invalid(
                        "composite strategy needs at least one child".into(),
                    ));
                }
                for child in children {
                    child.validate()?;
                }
            }
        }
        Ok(())
    }

    /// Instantiate the strategy tree this config describes.
    pub fn build(&self) -> Result<Box<dyn Strategy>, ConfigError> {
        self.validate()?;
        Ok(match self {
            StrategyConfig::MaCrossover {
                fast_period,
                slow_period,
            } => Box::new(MaCrossover::new(*fast_period, *slow_period)),
            StrategyConfig::RsiReversion {
                period,
                oversold,
                overbought,
            } => Box::new(RsiReversion::new(*period, *oversold, *overbought)),
            StrategyConfig::Composite { children } => {
                let built = children
                    .iter()
                    .map(|c| c.build())
                    .collect::<Result<Vec<_>, _>>()?;
                Box::new(Composite::new(built))
            }
        })
    }
}

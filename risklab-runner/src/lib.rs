//! RiskLab Runner — orchestration around `risklab-core`.
//!
//! This crate builds on `risklab-core` to provide:
//! - Serializable run configuration with content-addressable run ids
//! - Deterministic synthetic bar generation for development and tests
//! - JSON / CSV export of backtest results
//! - A live loop that drives the same per-bar session against a market
//!   feed and an execution client

pub mod config;
pub mod data;
pub mod live;
pub mod report;

pub use config::{ConfigError, RunConfig, RunId, StrategyConfig};
pub use data::synthetic_bars;
pub use live::{ExecError, ExecutionClient, FeedError, LiveFills, LiveLoop, MarketFeed, TickOutcome};
pub use report::{export_json, export_trades_csv, write_report_json, write_trades_csv};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn run_config_is_send_sync() {
        assert_send::<RunConfig>();
        assert_sync::<RunConfig>();
    }
}

//! Simulation loop — one synchronous fold over the bar sequence.
//!
//! Per bar, in order: exits for every open position (fixed precedence:
//! timeout → partial-take → trailing → stop/target), day rollover and halt
//! checks, then entry evaluation (signal → size → risk/reward gate →
//! cost-adjusted fill → ledger open). Nothing inside a pass is fatal.

pub mod backtest;
pub mod fills;
pub mod report;
pub mod session;

pub use backtest::Backtester;
pub use fills::{FillSource, ModelFills};
pub use report::{BacktestReport, SkipReason, SkippedEntry};
pub use session::Session;

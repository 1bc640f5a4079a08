//! Execution friction — basis-point cost model for simulated fills.

pub mod cost_model;

pub use cost_model::{CostConfig, CostModel};

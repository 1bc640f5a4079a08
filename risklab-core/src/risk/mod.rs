//! Risk policy — sizing, protective levels, trailing ratchet, and halts.

pub mod config;
pub mod policy;
pub mod state;

pub use config::RiskConfig;
pub use policy::{EntryRefusal, RiskPolicy};
pub use state::{HaltReason, RiskState};

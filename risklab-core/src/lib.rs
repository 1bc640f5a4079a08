//! RiskLab Core — simulation and risk-enforcement engine.
//!
//! This crate contains the heart of the backtesting engine:
//! - Domain types (bars, positions, trades, the position ledger)
//! - Cost model (slippage / spread / commission in basis points)
//! - Risk policy (sizing, protective levels, trailing ratchet, halts)
//! - Bar-by-bar simulation loop with fixed exit precedence
//! - Strategy trait with a closed set of variants
//! - Indicator helpers (SMA, ATR, RSI)

pub mod domain;
pub mod engine;
pub mod execution;
pub mod indicators;
pub mod risk;
pub mod strategy;

//! Domain types — bars, positions, trades, and the position ledger.

pub mod bar;
pub mod ids;
pub mod ledger;
pub mod position;
pub mod summary;
pub mod trade;

pub use bar::Bar;
pub use ids::{IdGen, PositionId};
pub use ledger::{LedgerError, PositionLedger};
pub use position::{OrderSide, Position, PositionSide};
pub use summary::LedgerSummary;
pub use trade::{ExitReason, Trade};

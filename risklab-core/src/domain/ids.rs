//! Position identifiers and their generator.
//!
//! Identity comes from an injected monotonic counter, not wall-clock plus
//! randomness, so every run is deterministic and test assertions can name
//! positions by id.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of an open position within one ledger.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PositionId(pub u64);

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pos-{}", self.0)
    }
}

/// Monotonic id generator, owned by the ledger.
#[derive(Debug, Clone, Default)]
pub struct IdGen {
    next_id: u64,
}

impl IdGen {
    pub fn next_id(&mut self) -> PositionId {
        self.next_id += 1;
        PositionId(self.next_id)
    }
}

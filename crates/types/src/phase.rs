//! Phase parity of the odd-even transposition protocol.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Parity of a sorting phase.
///
/// Phase `i` is odd when `i` is odd. Parity selects which neighbour a process
/// exchanges data with and which half it keeps after a compare-split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseParity {
    Even,
    Odd,
}

impl PhaseParity {
    /// Parity of the phase with the given index.
    pub fn of_phase(index: u32) -> Self {
        if index % 2 == 0 {
            PhaseParity::Even
        } else {
            PhaseParity::Odd
        }
    }

    /// Whether this is an odd phase.
    pub fn is_odd(self) -> bool {
        matches!(self, PhaseParity::Odd)
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            PhaseParity::Even => "EVEN",
            PhaseParity::Odd => "ODD",
        }
    }
}

impl fmt::Display for PhaseParity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Domain-specific identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Process rank: 0-based identity of a simulated process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rank(pub u32);

impl Rank {
    /// The first rank.
    pub const ZERO: Self = Rank(0);

    /// Get the raw value.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Rank as a vector index.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this rank is even.
    pub fn is_even(self) -> bool {
        self.0 % 2 == 0
    }

    /// Get the next rank.
    pub fn next(self) -> Self {
        Rank(self.0 + 1)
    }

    /// Get the previous rank (returns None at rank zero).
    pub fn prev(self) -> Option<Self> {
        self.0.checked_sub(1).map(Rank)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Originator of a message.
///
/// Process-to-process messages carry the sending rank. The system sender is
/// reserved for messages injected from outside the process set (initial data
/// distribution) and is exempt from rank validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sender {
    /// Injected by the simulation itself.
    System,
    /// Sent by the process with this rank.
    Process(Rank),
}

impl Sender {
    /// The sending rank, if this is a process.
    pub fn rank(self) -> Option<Rank> {
        match self {
            Sender::System => None,
            Sender::Process(rank) => Some(rank),
        }
    }
}

impl From<Rank> for Sender {
    fn from(rank: Rank) -> Self {
        Sender::Process(rank)
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::System => write!(f, "SYSTEM"),
            Sender::Process(rank) => write!(f, "{}", rank),
        }
    }
}

//! Core types for the odd-even transposition sort simulation.
//!
//! These are the identifiers shared by every layer of the simulation:
//! process ranks, message senders and phase parity.

mod identifiers;
mod phase;

pub use identifiers::{Rank, Sender};
pub use phase::PhaseParity;

/// Integer value sorted by the simulated processes.
pub type Value = i64;

/// Message tag carried by sends and receives.
pub type Tag = u32;

//! Core types for the odd-even transposition sort simulation.
//!
//! This crate defines the vocabulary shared by the simulation engine and the
//! tooling around it:
//!
//! - [`Event`]: an immutable, timestamped simulated occurrence
//! - [`SimulationError`]: validation failures surfaced as values
//! - [`DispatchObserver`]: hook invoked once per dispatched event
//!
//! All logical time is expressed as a [`std::time::Duration`] measured from
//! the start of the simulation; one logical unit is one second.

mod error;
mod event;
mod traits;

pub use error::SimulationError;
pub use event::{describe, format_time, Event, EventKind, EventPriority};
pub use traits::{DispatchObserver, NoopObserver};

pub use oddeven_types::{PhaseParity, Rank, Sender, Tag, Value};

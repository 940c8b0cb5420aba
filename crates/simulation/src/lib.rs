//! Deterministic discrete-event simulation of odd-even transposition sort.
//!
//! A fixed set of logical processes sorts a distributed array by exchanging
//! buffers with their neighbours over a simulated network. There is no real
//! parallelism: every send, receive and compare-split is an event in a single
//! time-ordered queue, and given the same input the simulation produces the
//! same result every run.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  SimulationRunner                       │
//! │                                                         │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     Event Queue (BTreeMap<EventKey, Event>)        │ │
//! │  │     Ordered by: time, priority, rank, sequence     │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │                             │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     PhaseStart → Send + CompareSplit per process   │ │
//! │  │     Send → Receive (via SimulatedTransport)        │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │                             │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     processors: Vec<Processor>, indexed by rank    │ │
//! │  │     local sort + merge-split                       │ │
//! │  └────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────┘
//! ```

mod config;
mod event_queue;
mod processor;
mod runner;
mod transport;

pub use config::{
    LatencyModel, SimulationConfig, TimingConfig, COMPARE_SPLIT_DELAY, LOCAL_SORT_DELAY,
    PER_ELEMENT_DELAY, PHASE_SPACING, RECV_DELAY, SEND_DELAY, START_SORT_DELAY,
};
pub use event_queue::{EventKey, EventQueue};
pub use processor::{Half, Processor};
pub use runner::{SimulationRunner, SimulationStats};
pub use transport::SimulatedTransport;

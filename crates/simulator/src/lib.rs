//! Odd-even sort simulator
//!
//! The tooling around the simulation engine: everything the engine leaves
//! to its caller.
//!
//! # Architecture
//!
//! The simulator builds on `oddeven-simulation` to provide:
//!
//! - **Data Generation**: Seeded random or deterministic per-process data
//! - **Event Log**: Text or JSON-lines record of every dispatched event
//! - **Reporting**: Initial/final state, sortedness and multiset checks, timing
//! - **Configuration**: Builder-style setup shared by the CLI and tests
//!
//! # Example
//!
//! ```ignore
//! use oddeven_simulator::{Simulator, SimulatorConfig};
//!
//! let config = SimulatorConfig::new(4, 10).with_seed(42);
//! let mut simulator = Simulator::new(config)?;
//! let report = simulator.run()?;
//! assert!(report.is_sorted);
//! report.print(true);
//! ```

pub mod config;
pub mod error;
pub mod event_log;
pub mod report;
pub mod runner;
pub mod workload;

pub use config::{DataMode, LogFormat, SimulatorConfig};
pub use error::SimulatorError;
pub use event_log::EventLogWriter;
pub use report::SimulationReport;
pub use runner::Simulator;
pub use workload::{DataGenerator, DescendingData, RandomData};

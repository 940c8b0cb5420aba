//! Error types for the simulator.

use oddeven_core::SimulationError;
use thiserror::Error;

/// Errors from setting up or running a simulation.
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// The simulation rejected its configuration, data or an event.
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// Writing the event log failed.
    #[error("Event log I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding a JSON event record failed.
    #[error("Event log encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

//! Error types for the simulation.

use oddeven_types::Sender;
use thiserror::Error;

/// Errors raised while configuring or running a simulation.
///
/// None of these are retried internally: the operation that raised one is
/// aborted and the error is handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// A message endpoint is outside `[0, num_processes)`.
    #[error("Invalid process rank {rank} (num_processes = {num_processes})")]
    InvalidRank {
        /// The offending endpoint.
        rank: Sender,
        /// Number of processes in the simulation.
        num_processes: u32,
    },

    /// Process count, element count or timing is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Loaded data does not match the configured shape.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

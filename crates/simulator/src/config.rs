//! Configuration types for the simulator.

use oddeven_core::Value;
use oddeven_simulation::{SimulationConfig, TimingConfig};
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Default number of processes.
pub const DEFAULT_NUM_PROCESSES: u32 = 10;

/// Default number of values per process.
pub const DEFAULT_ELEMENTS_PER_PROCESS: usize = 100;

/// Default event log location.
pub const DEFAULT_EVENT_LOG: &str = "event_log.txt";

/// How initial data is produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DataMode {
    /// Uniform random values from the seeded RNG.
    #[default]
    Random,

    /// `-(rank * K + i)`: strictly descending across the whole array.
    Descending,
}

/// Event log encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable header followed by one record per event.
    #[default]
    Text,

    /// One JSON object per line.
    Json,
}

/// Configuration for a simulation run.
#[derive(Clone, Debug)]
pub struct SimulatorConfig {
    /// Engine configuration (sizes and timing).
    pub simulation: SimulationConfig,

    /// Random seed for data generation.
    pub seed: u64,

    /// How initial data is produced.
    pub data: DataMode,

    /// Range random values are drawn from.
    pub value_range: RangeInclusive<Value>,

    /// Where to write the event log, if anywhere.
    pub event_log: Option<PathBuf>,

    /// Event log encoding.
    pub log_format: LogFormat,
}

impl SimulatorConfig {
    /// Create a new simulator configuration.
    pub fn new(num_processes: u32, elements_per_process: usize) -> Self {
        Self {
            simulation: SimulationConfig::new(num_processes, elements_per_process),
            seed: 12345,
            data: DataMode::default(),
            value_range: 1..=100_000,
            event_log: None,
            log_format: LogFormat::default(),
        }
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the data mode.
    pub fn with_data(mut self, data: DataMode) -> Self {
        self.data = data;
        self
    }

    /// Set the range random values are drawn from.
    pub fn with_value_range(mut self, range: RangeInclusive<Value>) -> Self {
        self.value_range = range;
        self
    }

    /// Write the event log to `path`.
    pub fn with_event_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.event_log = Some(path.into());
        self
    }

    /// Set the event log encoding.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    /// Set the protocol timing.
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.simulation.timing = timing;
        self
    }

    /// Number of processes.
    pub fn num_processes(&self) -> u32 {
        self.simulation.num_processes
    }

    /// Number of values per process.
    pub fn elements_per_process(&self) -> usize {
        self.simulation.elements_per_process
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_NUM_PROCESSES, DEFAULT_ELEMENTS_PER_PROCESS)
    }
}

//! Simulator: data generation, the engine run and reporting in one place.

use crate::config::SimulatorConfig;
use crate::error::SimulatorError;
use crate::event_log::EventLogWriter;
use crate::report::SimulationReport;
use oddeven_core::{SimulationError, Value};
use oddeven_simulation::SimulationRunner;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;
use tracing::info;

/// Drives one simulation from configuration to report.
pub struct Simulator {
    config: SimulatorConfig,
    runner: SimulationRunner,
    initial: Vec<Vec<Value>>,
}

impl Simulator {
    /// Build the engine and load it with generated data.
    pub fn new(config: SimulatorConfig) -> Result<Self, SimulatorError> {
        if config.value_range.is_empty() {
            return Err(SimulationError::InvalidConfiguration(format!(
                "empty value range {:?}",
                config.value_range
            ))
            .into());
        }

        let mut runner = SimulationRunner::new(config.simulation.clone())?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let initial = config.data.generate(
            config.num_processes(),
            config.elements_per_process(),
            config.value_range.clone(),
            &mut rng,
        );
        runner.load_all_data(initial.clone())?;

        info!(
            num_processes = config.num_processes(),
            elements_per_process = config.elements_per_process(),
            seed = config.seed,
            data = ?config.data,
            "Simulator initialized"
        );

        Ok(Self {
            config,
            runner,
            initial,
        })
    }

    /// Run the simulation to completion and build the report.
    pub fn run(&mut self) -> Result<SimulationReport, SimulatorError> {
        let started = Instant::now();

        let stats = match &self.config.event_log {
            Some(path) => {
                let mut log =
                    EventLogWriter::create(path, self.config.log_format, &self.config.simulation)?;
                let stats = self.runner.run_with_observer(&mut log)?;
                let records = log.records();
                log.finish()?;
                info!(path = %path.display(), records, "Event log saved");
                stats
            }
            None => self.runner.run()?,
        };

        let wall_time = started.elapsed();
        let final_buffers = self
            .runner
            .processors()
            .iter()
            .map(|p| p.data().to_vec())
            .collect();

        let report = SimulationReport::new(
            self.initial.clone(),
            final_buffers,
            stats,
            self.runner.now(),
            wall_time,
            self.config.event_log.clone(),
        );
        info!(
            sorted = report.is_sorted,
            preserved = report.multiset_preserved,
            wall_time_us = report.wall_time.as_micros() as u64,
            "Simulation finished"
        );

        Ok(report)
    }

    /// Data loaded before the run, in rank order.
    pub fn initial_data(&self) -> &[Vec<Value>] {
        &self.initial
    }

    /// The underlying engine.
    pub fn runner(&self) -> &SimulationRunner {
        &self.runner
    }

    /// The configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }
}

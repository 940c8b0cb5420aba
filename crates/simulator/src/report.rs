//! Final report of a simulation run.

use oddeven_core::{format_time, Value};
use oddeven_simulation::SimulationStats;
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of a simulation run.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// Buffers as loaded, in rank order.
    pub initial: Vec<Vec<Value>>,

    /// Buffers after the run, in rank order.
    pub final_buffers: Vec<Vec<Value>>,

    /// Final buffers concatenated in rank order.
    pub gathered: Vec<Value>,

    /// Whether `gathered` is ascending.
    pub is_sorted: bool,

    /// Whether the run kept exactly the loaded values.
    pub multiset_preserved: bool,

    /// Engine statistics.
    pub stats: SimulationStats,

    /// Final logical time.
    pub simulation_time: Duration,

    /// Wall-clock duration of the run.
    pub wall_time: Duration,

    /// Where the event log was written, if anywhere.
    pub event_log: Option<PathBuf>,
}

impl SimulationReport {
    /// Build a report, computing the sortedness and multiset checks.
    pub fn new(
        initial: Vec<Vec<Value>>,
        final_buffers: Vec<Vec<Value>>,
        stats: SimulationStats,
        simulation_time: Duration,
        wall_time: Duration,
        event_log: Option<PathBuf>,
    ) -> Self {
        let gathered: Vec<Value> = final_buffers.iter().flatten().copied().collect();
        let is_sorted = is_sorted(&gathered);
        let multiset_preserved = same_multiset(&initial, &gathered);

        Self {
            initial,
            final_buffers,
            gathered,
            is_sorted,
            multiset_preserved,
            stats,
            simulation_time,
            wall_time,
            event_log,
        }
    }

    /// Print the report to stdout. Buffers are dumped when `show_buffers`.
    pub fn print(&self, show_buffers: bool) {
        if show_buffers {
            println!("Initial state:");
            print_buffers(&self.initial);
            println!();
            println!("Final state:");
            print_buffers(&self.final_buffers);
            println!();
        }

        println!("Verification:");
        if show_buffers {
            print_vector("Sorted data", &self.gathered);
        }
        println!(
            "Is correctly sorted: {}",
            if self.is_sorted { "Yes" } else { "No" }
        );
        println!(
            "Values preserved: {}",
            if self.multiset_preserved { "Yes" } else { "No" }
        );
        println!(
            "Sorting time: {} microseconds\t{} seconds",
            self.wall_time.as_micros(),
            self.wall_time.as_secs_f64()
        );
        println!(
            "Simulation time: {} units",
            format_time(self.simulation_time)
        );
        println!(
            "Events processed: {} ({} sends, {} receives, {} compare-splits, {} phases)",
            self.stats.events_processed,
            self.stats.sends,
            self.stats.receives,
            self.stats.compare_splits,
            self.stats.phases_scheduled
        );
        if let Some(path) = &self.event_log {
            println!("Event log saved to: {}", path.display());
        }
    }
}

fn print_buffers(buffers: &[Vec<Value>]) {
    for (rank, buffer) in buffers.iter().enumerate() {
        print_vector(&format!("Processor {}", rank), buffer);
    }
}

fn print_vector(label: &str, values: &[Value]) {
    let rendered: Vec<String> = values.iter().map(|v| format!("{:>4}", v)).collect();
    println!("{}: {}", label, rendered.join(" "));
}

fn is_sorted(values: &[Value]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

fn same_multiset(initial: &[Vec<Value>], gathered: &[Value]) -> bool {
    let mut before: Vec<Value> = initial.iter().flatten().copied().collect();
    let mut after = gathered.to_vec();
    before.sort_unstable();
    after.sort_unstable();
    before == after
}

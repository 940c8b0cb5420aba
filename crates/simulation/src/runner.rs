//! Deterministic simulation runner.
//!
//! Owns the event queue and every processor, and drives the dispatch loop
//! that carries the odd-even transposition sort forward in logical time.

use crate::config::{later, SimulationConfig};
use crate::event_queue::EventQueue;
use crate::processor::Processor;
use crate::transport::SimulatedTransport;
use oddeven_core::{
    describe, DispatchObserver, Event, EventKind, NoopObserver, PhaseParity, Rank, Sender,
    SimulationError, Tag, Value,
};
use std::time::Duration;
use tracing::{debug, info, trace};

/// Tag carried by phase exchanges.
const EXCHANGE_TAG: Tag = 0;

/// Statistics collected during simulation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SimulationStats {
    /// Total events processed.
    pub events_processed: u64,
    /// Phase-start events processed.
    pub phase_starts: u64,
    /// Send events processed.
    pub sends: u64,
    /// Receive events processed.
    pub receives: u64,
    /// Compare-split events processed.
    pub compare_splits: u64,
    /// Phases scheduled by phase-start events.
    pub phases_scheduled: u64,
    /// (process, phase) pairs skipped for lack of a partner.
    pub boundary_skips: u64,
    /// Largest number of pending events observed.
    pub max_queue_depth: usize,
}

/// Deterministic simulation runner.
///
/// Processes events in time order until the queue is empty. Each runner is
/// a self-contained value; any number of them can exist side by side.
pub struct SimulationRunner {
    /// Validated configuration.
    config: SimulationConfig,

    /// All processors, indexed by rank.
    processors: Vec<Processor>,

    /// Pending events, ordered by time.
    event_queue: EventQueue,

    /// Network model.
    transport: SimulatedTransport,

    /// Current simulation time.
    now: Duration,

    /// Statistics.
    stats: SimulationStats,
}

impl SimulationRunner {
    /// Create a runner with `config.num_processes` empty processors.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let processors = (0..config.num_processes)
            .map(|rank| Processor::new(Rank(rank)))
            .collect();
        let transport = SimulatedTransport::new(config.num_processes, &config.timing);

        Ok(Self {
            config,
            processors,
            event_queue: EventQueue::new(),
            transport,
            now: Duration::ZERO,
            stats: SimulationStats::default(),
        })
    }

    /// Load one sequence per rank, each exactly `elements_per_process` long.
    pub fn load_all_data(&mut self, data: Vec<Vec<Value>>) -> Result<(), SimulationError> {
        if data.len() != self.processors.len() {
            return Err(SimulationError::InvalidData(format!(
                "expected {} sequences, got {}",
                self.processors.len(),
                data.len()
            )));
        }
        if let Some((rank, values)) = data
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != self.config.elements_per_process)
        {
            return Err(SimulationError::InvalidData(format!(
                "rank {} has {} values, expected {}",
                rank,
                values.len(),
                self.config.elements_per_process
            )));
        }

        for (processor, values) in self.processors.iter_mut().zip(data) {
            processor.load_data(values);
        }
        Ok(())
    }

    /// Schedule an event before (or between) runs.
    pub fn schedule_initial_event(&mut self, event: Event) {
        self.event_queue.schedule(event);
    }

    /// Run the sort to completion.
    pub fn run(&mut self) -> Result<SimulationStats, SimulationError> {
        self.run_with_observer(&mut NoopObserver)
    }

    /// Run the sort to completion, reporting every dispatched event.
    ///
    /// Seeds a single phase-start event `start_sort_delay` after the current
    /// time and processes events until none remain. On error the run stops
    /// immediately; events still pending stay in the queue.
    pub fn run_with_observer<O>(&mut self, observer: &mut O) -> Result<SimulationStats, SimulationError>
    where
        O: DispatchObserver + ?Sized,
    {
        info!(
            num_processes = self.config.num_processes,
            elements_per_process = self.config.elements_per_process,
            total_elements = self.config.total_elements(),
            "Starting odd-even sort simulation"
        );

        let start = later(self.now, self.config.timing.start_sort_delay)?;
        self.event_queue.schedule(Event::phase_start(start));

        while let Some(event) = self.event_queue.pop_earliest() {
            self.now = self.now.max(event.time());
            self.stats.events_processed += 1;
            trace!(kind = event.kind().type_name(), now = ?self.now, "Dispatching event");

            self.dispatch(&event)?;

            self.stats.max_queue_depth = self.stats.max_queue_depth.max(self.event_queue.len());
            let record = describe(&event, self.now);
            observer.on_dispatch(&event, self.now, &record);
        }

        info!(
            events = self.stats.events_processed,
            phases = self.stats.phases_scheduled,
            now = ?self.now,
            "Simulation complete"
        );
        Ok(self.stats.clone())
    }

    fn dispatch(&mut self, event: &Event) -> Result<(), SimulationError> {
        match event.kind() {
            EventKind::PhaseStart => self.on_phase_start(),
            EventKind::Send {
                from,
                to,
                payload,
                tag,
            } => self.on_send(*from, *to, payload, *tag),
            EventKind::Receive { to, payload, .. } => self.on_receive(*to, payload),
            EventKind::CompareSplit { rank, parity } => self.on_compare_split(*rank, *parity),
        }
    }

    /// Schedule every phase: a send and a compare-split per paired process.
    ///
    /// Phase `i` is offset by `i * phase_spacing`. A process without a
    /// partner in a phase gets no events for it.
    fn on_phase_start(&mut self) -> Result<(), SimulationError> {
        self.stats.phase_starts += 1;
        let timing = &self.config.timing;

        for phase in 0..self.config.num_processes {
            let parity = PhaseParity::of_phase(phase);
            let offset = timing.phase_spacing.checked_mul(phase).ok_or_else(|| {
                SimulationError::InvalidConfiguration(format!(
                    "phase {} offset overflows logical time",
                    phase
                ))
            })?;
            let phase_base = later(self.now, offset)?;
            debug!(phase, %parity, "Scheduling phase");

            for processor in &self.processors {
                let rank = processor.rank();
                let Some(neighbor) = processor
                    .neighbor_for(parity)
                    .filter(|&neighbor| self.transport.contains(neighbor))
                else {
                    self.stats.boundary_skips += 1;
                    trace!(phase, %rank, "No partner this phase");
                    continue;
                };

                let send = self.transport.make_send(
                    Sender::Process(rank),
                    neighbor,
                    processor.data().to_vec(),
                    EXCHANGE_TAG,
                    phase_base,
                )?;
                let received_at = later(
                    send.time(),
                    self.transport.receive_delay(processor.data().len()),
                )?;
                let split_time = later(received_at, timing.compare_split_delay)?;

                self.event_queue.schedule(send);
                self.event_queue
                    .schedule(Event::compare_split(split_time, rank, parity));
            }

            self.stats.phases_scheduled += 1;
        }

        Ok(())
    }

    /// Forward the sender's current buffer to the destination.
    ///
    /// Process senders ship what they hold now, not what they held when the
    /// send was scheduled. System senders ship the event payload.
    fn on_send(
        &mut self,
        from: Sender,
        to: Rank,
        payload: &[Value],
        tag: Tag,
    ) -> Result<(), SimulationError> {
        self.stats.sends += 1;

        let data = match from {
            Sender::Process(rank) => self.processor(rank)?.data().to_vec(),
            Sender::System => payload.to_vec(),
        };
        let receive = self.transport.make_receive(to, from, data, tag, self.now)?;
        self.event_queue.schedule(receive);

        Ok(())
    }

    fn on_receive(&mut self, to: Rank, payload: &[Value]) -> Result<(), SimulationError> {
        self.stats.receives += 1;
        self.processor_mut(to)?.set_received(payload.to_vec());
        Ok(())
    }

    fn on_compare_split(&mut self, rank: Rank, parity: PhaseParity) -> Result<(), SimulationError> {
        self.stats.compare_splits += 1;

        let processor = self.processor_mut(rank)?;
        processor.local_sort_both();
        let half = processor.merge_split(parity);
        debug!(%rank, %parity, ?half, "Compare-split complete");

        Ok(())
    }

    fn processor(&self, rank: Rank) -> Result<&Processor, SimulationError> {
        self.processors
            .get(rank.index())
            .ok_or(SimulationError::InvalidRank {
                rank: Sender::Process(rank),
                num_processes: self.config.num_processes,
            })
    }

    fn processor_mut(&mut self, rank: Rank) -> Result<&mut Processor, SimulationError> {
        let num_processes = self.config.num_processes;
        self.processors
            .get_mut(rank.index())
            .ok_or(SimulationError::InvalidRank {
                rank: Sender::Process(rank),
                num_processes,
            })
    }

    // ─── Introspection ───

    /// Current simulation time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// The owned buffer of `rank`.
    pub fn process_buffer(&self, rank: Rank) -> Option<&[Value]> {
        self.processors.get(rank.index()).map(Processor::data)
    }

    /// Number of processes.
    pub fn process_count(&self) -> u32 {
        self.config.num_processes
    }

    /// All processors, in rank order.
    pub fn processors(&self) -> &[Processor] {
        &self.processors
    }

    /// Every owned buffer concatenated in rank order.
    pub fn gather(&self) -> Vec<Value> {
        self.processors
            .iter()
            .flat_map(|p| p.data().iter().copied())
            .collect()
    }

    /// Number of events still pending.
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }

    /// Statistics so far.
    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// The configuration this runner was built with.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TimingConfig, RECV_DELAY};

    fn runner(n: u32, data: Vec<Vec<Value>>) -> SimulationRunner {
        let k = data.first().map_or(1, Vec::len);
        let mut runner = SimulationRunner::new(SimulationConfig::new(n, k)).unwrap();
        runner.load_all_data(data).unwrap();
        runner
    }

    #[test]
    fn test_two_process_exchange() {
        let mut runner = runner(2, vec![vec![9, 1, 5], vec![7, 3, 2]]);
        runner.run().unwrap();

        assert_eq!(runner.process_buffer(Rank(0)), Some(&[1, 2, 3][..]));
        assert_eq!(runner.process_buffer(Rank(1)), Some(&[5, 7, 9][..]));
    }

    #[test]
    fn test_event_counts_for_two_processes() {
        let mut runner = runner(2, vec![vec![2], vec![1]]);
        let stats = runner.run().unwrap();

        // Phase 0 (even): both ranks lack a partner. Phase 1 (odd): 0 <-> 1.
        assert_eq!(stats.phases_scheduled, 2);
        assert_eq!(stats.boundary_skips, 2);
        assert_eq!(stats.sends, 2);
        assert_eq!(stats.receives, 2);
        assert_eq!(stats.compare_splits, 2);
        assert_eq!(stats.events_processed, 7);
        assert_eq!(runner.gather(), vec![1, 2]);
    }

    #[test]
    fn test_final_time_follows_timing_model() {
        let mut runner = runner(2, vec![vec![2], vec![1]]);
        runner.run().unwrap();

        // start 2.5, phase 1 send at 2.5 + 50 + 1, compare-split +1 +4
        assert_eq!(runner.now(), Duration::from_millis(58_500));
    }

    #[test]
    fn test_receive_lands_one_receive_delay_after_send() {
        let mut runner = runner(2, vec![vec![2], vec![1]]);
        let mut sends = Vec::new();
        let mut receives = Vec::new();
        runner
            .run_with_observer(&mut |event: &Event, _now: Duration, _record: &str| {
                match event.kind() {
                    EventKind::Send { .. } => sends.push(event.time()),
                    EventKind::Receive { .. } => receives.push(event.time()),
                    _ => {}
                }
            })
            .unwrap();

        // Phase 1 sends at 2.5 + 50 + 1; each receive follows by exactly RECV_DELAY.
        assert_eq!(sends, vec![Duration::from_millis(53_500); 2]);
        assert_eq!(
            receives,
            sends.iter().map(|&sent| sent + RECV_DELAY).collect::<Vec<_>>()
        );
        assert_eq!(receives[0], Duration::from_millis(54_500));
    }

    #[test]
    fn test_unrepresentable_phase_spacing_rejected() {
        let timing = TimingConfig::default().with_phase_spacing(Duration::from_secs(u64::MAX / 2));
        let config = SimulationConfig::new(4, 1).with_timing(timing);
        assert!(matches!(
            SimulationRunner::new(config),
            Err(SimulationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_event_past_end_of_time_returns_error() {
        let mut runner = runner(2, vec![vec![1], vec![2]]);
        runner.schedule_initial_event(Event::new(
            Duration::MAX,
            EventKind::Send {
                from: Sender::System,
                to: Rank(0),
                payload: vec![7],
                tag: 0,
            },
        ));

        let err = runner.run().unwrap_err();
        assert!(matches!(err, SimulationError::InvalidConfiguration(_)));
        // The sort itself finished before the late send was reached.
        assert_eq!(runner.gather(), vec![1, 2]);
        assert_eq!(runner.now(), Duration::MAX);
    }

    #[test]
    fn test_config_is_kept() {
        let timing = TimingConfig::default().with_phase_spacing(Duration::from_secs(10));
        let config = SimulationConfig::new(3, 2).with_timing(timing);
        let runner = SimulationRunner::new(config.clone()).unwrap();
        assert_eq!(runner.config(), &config);
        assert_eq!(runner.process_count(), 3);
    }

    #[test]
    fn test_load_rejects_wrong_shape() {
        let mut runner = SimulationRunner::new(SimulationConfig::new(2, 2)).unwrap();
        assert!(matches!(
            runner.load_all_data(vec![vec![1, 2]]),
            Err(SimulationError::InvalidData(_))
        ));
        assert!(matches!(
            runner.load_all_data(vec![vec![1, 2], vec![3]]),
            Err(SimulationError::InvalidData(_))
        ));
    }

    #[test]
    fn test_invalid_configuration_rejected() {
        assert!(matches!(
            SimulationRunner::new(SimulationConfig::new(0, 3)),
            Err(SimulationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_system_send_delivers_payload() {
        let mut runner = runner(2, vec![vec![1], vec![2]]);
        runner.schedule_initial_event(Event::new(
            Duration::from_secs(1),
            EventKind::Send {
                from: Sender::System,
                to: Rank(1),
                payload: vec![42],
                tag: 3,
            },
        ));
        let mut seen = Vec::new();
        runner
            .run_with_observer(&mut |event: &Event, _now: Duration, _record: &str| {
                seen.push(event.kind().type_name());
            })
            .unwrap();

        assert_eq!(&seen[..2], &["SEND", "RECV"]);
        assert_eq!(runner.stats().receives, 3);
    }

    #[test]
    fn test_send_to_invalid_rank_aborts_run() {
        let mut runner = runner(2, vec![vec![1], vec![2]]);
        runner.schedule_initial_event(Event::new(
            Duration::from_secs(1),
            EventKind::Send {
                from: Sender::Process(Rank(0)),
                to: Rank(5),
                payload: vec![],
                tag: 0,
            },
        ));

        let err = runner.run().unwrap_err();
        assert!(matches!(err, SimulationError::InvalidRank { .. }));
        // The phase-start never ran.
        assert_eq!(runner.stats().phases_scheduled, 0);
        assert_eq!(runner.pending_events(), 1);
    }
}

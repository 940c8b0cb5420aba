//! Simulation configuration and timing constants.
//!
//! All delays are logical time: one unit is one second of [`Duration`].

use oddeven_core::SimulationError;
use std::time::Duration;

/// Delay before the single phase-start event fires.
pub const START_SORT_DELAY: Duration = Duration::from_millis(2_500);

/// Base network delay of a send.
pub const SEND_DELAY: Duration = Duration::from_secs(1);

/// Base network delay of a receive.
pub const RECV_DELAY: Duration = Duration::from_secs(1);

/// Delay between the expected receive and the compare-split that consumes it.
pub const COMPARE_SPLIT_DELAY: Duration = Duration::from_secs(4);

/// Offset multiplied by the phase index; phase `i` starts `i * PHASE_SPACING`
/// after phase 0.
pub const PHASE_SPACING: Duration = Duration::from_secs(50);

/// Cost of a local sort. Informational: the sort runs inside the
/// compare-split event and is never scheduled on its own.
pub const LOCAL_SORT_DELAY: Duration = Duration::from_secs(2);

/// Size-dependent component of network delay, per element carried.
pub const PER_ELEMENT_DELAY: Duration = Duration::ZERO;

/// Advance `time` by `delay`, failing if the result leaves logical time.
pub(crate) fn later(time: Duration, delay: Duration) -> Result<Duration, SimulationError> {
    time.checked_add(delay).ok_or_else(|| {
        SimulationError::InvalidConfiguration(format!(
            "event time {:?} + {:?} overflows logical time",
            time, delay
        ))
    })
}

/// Network delay as a function of payload size: `base + per_element * len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyModel {
    /// Fixed part of the delay.
    pub base: Duration,
    /// Added once per element carried.
    pub per_element: Duration,
}

impl LatencyModel {
    /// A delay that ignores payload size.
    pub const fn fixed(base: Duration) -> Self {
        Self {
            base,
            per_element: Duration::ZERO,
        }
    }

    /// Delay for a payload of `len` elements.
    pub fn delay(&self, len: usize) -> Duration {
        let len = u32::try_from(len).unwrap_or(u32::MAX);
        self.base.saturating_add(self.per_element.saturating_mul(len))
    }
}

/// Timing of the sorting protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingConfig {
    /// Delay before the phase-start event fires.
    pub start_sort_delay: Duration,

    /// Latency of send events.
    pub send: LatencyModel,

    /// Latency of receive events.
    pub receive: LatencyModel,

    /// Delay between expected receive and compare-split.
    pub compare_split_delay: Duration,

    /// Spacing between consecutive phases.
    pub phase_spacing: Duration,

    /// Informational cost of a local sort (see [`LOCAL_SORT_DELAY`]).
    pub local_sort_delay: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            start_sort_delay: START_SORT_DELAY,
            send: LatencyModel {
                base: SEND_DELAY,
                per_element: PER_ELEMENT_DELAY,
            },
            receive: LatencyModel {
                base: RECV_DELAY,
                per_element: PER_ELEMENT_DELAY,
            },
            compare_split_delay: COMPARE_SPLIT_DELAY,
            phase_spacing: PHASE_SPACING,
            local_sort_delay: LOCAL_SORT_DELAY,
        }
    }
}

impl TimingConfig {
    /// Set the phase spacing.
    pub fn with_phase_spacing(mut self, spacing: Duration) -> Self {
        self.phase_spacing = spacing;
        self
    }

    /// Set the compare-split delay.
    pub fn with_compare_split_delay(mut self, delay: Duration) -> Self {
        self.compare_split_delay = delay;
        self
    }

    /// Set the per-element delay on both sends and receives.
    pub fn with_per_element_delay(mut self, per_element: Duration) -> Self {
        self.send.per_element = per_element;
        self.receive.per_element = per_element;
        self
    }

    /// Set the send latency model.
    pub fn with_send_latency(mut self, latency: LatencyModel) -> Self {
        self.send = latency;
        self
    }

    /// Set the receive latency model.
    pub fn with_receive_latency(mut self, latency: LatencyModel) -> Self {
        self.receive = latency;
        self
    }

    /// Check that phases carrying `elements` values cannot interleave.
    ///
    /// A compare-split must land strictly after the receive it consumes, and
    /// strictly before the next phase's send reads the buffer it rewrites.
    pub fn validate(&self, elements: usize) -> Result<(), SimulationError> {
        if self.compare_split_delay.is_zero() {
            return Err(SimulationError::InvalidConfiguration(
                "compare-split delay must be positive".to_string(),
            ));
        }

        let phase_busy = self
            .receive
            .delay(elements)
            .saturating_add(self.compare_split_delay);
        if self.phase_spacing <= phase_busy {
            return Err(SimulationError::InvalidConfiguration(format!(
                "phase spacing {:?} must exceed receive + compare-split delay {:?}",
                self.phase_spacing, phase_busy
            )));
        }

        Ok(())
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of simulated processes (N).
    pub num_processes: u32,

    /// Number of values held by each process (K).
    pub elements_per_process: usize,

    /// Protocol timing.
    pub timing: TimingConfig,
}

impl SimulationConfig {
    /// Create a new configuration with default timing.
    pub fn new(num_processes: u32, elements_per_process: usize) -> Self {
        Self {
            num_processes,
            elements_per_process,
            timing: TimingConfig::default(),
        }
    }

    /// Set the timing configuration.
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Total number of values across all processes.
    pub fn total_elements(&self) -> usize {
        self.num_processes as usize * self.elements_per_process
    }

    /// Latest event time of a run relative to its start, or `None` if it
    /// does not fit in a [`Duration`].
    ///
    /// The last phase's compare-split lands at
    /// `start_sort + (N - 1) * spacing + send + receive + compare_split`.
    pub fn horizon(&self) -> Option<Duration> {
        let timing = &self.timing;
        let k = self.elements_per_process;
        timing
            .phase_spacing
            .checked_mul(self.num_processes.saturating_sub(1))?
            .checked_add(timing.start_sort_delay)?
            .checked_add(timing.send.delay(k))?
            .checked_add(timing.receive.delay(k))?
            .checked_add(timing.compare_split_delay)
    }

    /// Reject non-positive sizes, overlapping phase timing and schedules
    /// that overflow logical time.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.num_processes == 0 {
            return Err(SimulationError::InvalidConfiguration(
                "number of processes must be positive".to_string(),
            ));
        }
        if self.elements_per_process == 0 {
            return Err(SimulationError::InvalidConfiguration(
                "elements per process must be positive".to_string(),
            ));
        }
        self.timing.validate(self.elements_per_process)?;
        if self.horizon().is_none() {
            return Err(SimulationError::InvalidConfiguration(format!(
                "{} phases spaced {:?} overflow logical time",
                self.num_processes, self.timing.phase_spacing
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::new(10, 100).validate().is_ok());
    }

    #[test]
    fn test_zero_sizes_rejected() {
        assert!(matches!(
            SimulationConfig::new(0, 4).validate(),
            Err(SimulationError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            SimulationConfig::new(4, 0).validate(),
            Err(SimulationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_latency_scales_with_size() {
        let model = LatencyModel {
            base: Duration::from_secs(1),
            per_element: Duration::from_millis(100),
        };
        assert_eq!(model.delay(0), Duration::from_secs(1));
        assert_eq!(model.delay(5), Duration::from_millis(1_500));
        assert_eq!(
            LatencyModel::fixed(Duration::from_secs(1)).delay(1_000),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn test_overlapping_phases_rejected() {
        // receive (1) + compare-split (4) = 5; spacing must be strictly larger
        let timing = TimingConfig::default().with_phase_spacing(Duration::from_secs(5));
        assert!(timing.validate(10).is_err());

        let timing = TimingConfig::default().with_phase_spacing(Duration::from_secs(6));
        assert!(timing.validate(10).is_ok());
    }

    #[test]
    fn test_unrepresentable_schedule_rejected() {
        let timing = TimingConfig::default().with_phase_spacing(Duration::from_secs(u64::MAX / 2));
        // The spacing alone is fine; four phases of it are not.
        assert!(timing.validate(1).is_ok());
        let config = SimulationConfig::new(4, 1).with_timing(timing.clone());
        assert_eq!(config.horizon(), None);
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidConfiguration(_))
        ));

        // A single process never schedules past phase 0.
        assert!(SimulationConfig::new(1, 1).with_timing(timing).validate().is_ok());
    }

    #[test]
    fn test_horizon_of_default_timing() {
        // 2.5 + 1 * 50 + 1 + 1 + 4
        assert_eq!(
            SimulationConfig::new(2, 1).horizon(),
            Some(Duration::from_millis(58_500))
        );
    }

    #[test]
    fn test_later_reports_overflow() {
        assert_eq!(
            later(Duration::from_secs(2), Duration::from_secs(3)),
            Ok(Duration::from_secs(5))
        );
        assert!(matches!(
            later(Duration::MAX, Duration::from_secs(1)),
            Err(SimulationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_size_scaled_delay_counts_against_spacing() {
        let timing = TimingConfig::default().with_per_element_delay(Duration::from_millis(500));
        // 1 + 100 * 0.5 + 4 = 55 > 50
        assert!(timing.validate(100).is_err());
        assert!(timing.validate(10).is_ok());
    }

    #[test]
    fn test_zero_compare_split_delay_rejected() {
        let timing = TimingConfig::default().with_compare_split_delay(Duration::ZERO);
        assert!(timing.validate(1).is_err());
    }
}

//! Simulated message transport.
//!
//! Validates message endpoints and stamps each send/receive with its network
//! delay. The transport holds no mutable state: the same inputs always give
//! the same event.

use crate::config::{later, LatencyModel, TimingConfig};
use oddeven_core::{Event, EventKind, Rank, Sender, SimulationError, Tag, Value};
use std::time::Duration;
use tracing::trace;

/// Simulated point-to-point network between ranks `0..num_processes`.
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    num_processes: u32,
    send_latency: LatencyModel,
    receive_latency: LatencyModel,
}

impl SimulatedTransport {
    /// Create a transport for `num_processes` ranks using the given timing.
    pub fn new(num_processes: u32, timing: &TimingConfig) -> Self {
        Self {
            num_processes,
            send_latency: timing.send,
            receive_latency: timing.receive,
        }
    }

    /// Number of addressable ranks.
    pub fn num_processes(&self) -> u32 {
        self.num_processes
    }

    /// Whether `rank` is in `[0, num_processes)`.
    pub fn contains(&self, rank: Rank) -> bool {
        rank.get() < self.num_processes
    }

    /// Delay of a send carrying `len` values.
    pub fn send_delay(&self, len: usize) -> Duration {
        self.send_latency.delay(len)
    }

    /// Delay of a receive carrying `len` values.
    pub fn receive_delay(&self, len: usize) -> Duration {
        self.receive_latency.delay(len)
    }

    /// Build a send event from `from` to `to`, firing after the send delay.
    pub fn make_send(
        &self,
        from: Sender,
        to: Rank,
        data: Vec<Value>,
        tag: Tag,
        now: Duration,
    ) -> Result<Event, SimulationError> {
        self.check_endpoints(from, to)?;

        let time = later(now, self.send_delay(data.len()))?;
        trace!(%from, %to, len = data.len(), ?time, "Send scheduled");

        Ok(Event::new(
            time,
            EventKind::Send {
                from,
                to,
                payload: data,
                tag,
            },
        ))
    }

    /// Build a receive event delivering `data` to `to`, firing after the
    /// receive delay.
    pub fn make_receive(
        &self,
        to: Rank,
        from: Sender,
        data: Vec<Value>,
        tag: Tag,
        now: Duration,
    ) -> Result<Event, SimulationError> {
        self.check_endpoints(from, to)?;

        let time = later(now, self.receive_delay(data.len()))?;
        trace!(%from, %to, len = data.len(), ?time, "Receive scheduled");

        Ok(Event::new(
            time,
            EventKind::Receive {
                from,
                to,
                payload: data,
                tag,
            },
        ))
    }

    fn check_endpoints(&self, from: Sender, to: Rank) -> Result<(), SimulationError> {
        if !self.contains(to) {
            return Err(self.invalid(Sender::Process(to)));
        }
        match from {
            Sender::System => Ok(()),
            Sender::Process(rank) if self.contains(rank) => Ok(()),
            Sender::Process(_) => Err(self.invalid(from)),
        }
    }

    fn invalid(&self, rank: Sender) -> SimulationError {
        SimulationError::InvalidRank {
            rank,
            num_processes: self.num_processes,
        }
    }
}

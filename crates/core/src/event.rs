//! Simulated events.

use oddeven_types::{PhaseParity, Rank, Sender, Tag, Value};
use serde::Serialize;
use std::time::Duration;

/// Priority for ordering events scheduled at the same time.
///
/// Lower values are processed first. Delivery runs before computation so a
/// receive landing at the same instant as a compare-split is applied first.
/// This is a tie-breaker for determinism only; scheduling never relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum EventPriority {
    /// Phase scheduling.
    Phase = 0,
    /// Message send and delivery.
    Network = 1,
    /// Local computation on a process.
    Compute = 2,
}

/// What happened, with only the fields each kind needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// Kick off the sorting protocol: schedules every phase.
    #[serde(rename = "START_SORT")]
    PhaseStart,

    /// A process hands a buffer to the network.
    Send {
        from: Sender,
        to: Rank,
        payload: Vec<Value>,
        tag: Tag,
    },

    /// A buffer arrives at its destination process.
    #[serde(rename = "RECV")]
    Receive {
        from: Sender,
        to: Rank,
        payload: Vec<Value>,
        tag: Tag,
    },

    /// A process merges its own and received buffers and keeps one half.
    CompareSplit { rank: Rank, parity: PhaseParity },
}

impl EventKind {
    /// Get a human-readable name for this event kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            EventKind::PhaseStart => "START_SORT",
            EventKind::Send { .. } => "SEND",
            EventKind::Receive { .. } => "RECV",
            EventKind::CompareSplit { .. } => "COMPARE_SPLIT",
        }
    }

    /// Tie-break priority of this kind.
    pub fn priority(&self) -> EventPriority {
        match self {
            EventKind::PhaseStart => EventPriority::Phase,
            EventKind::Send { .. } | EventKind::Receive { .. } => EventPriority::Network,
            EventKind::CompareSplit { .. } => EventPriority::Compute,
        }
    }

    /// The process this event concerns, if any.
    ///
    /// Sends concern their source, receives their destination.
    pub fn process(&self) -> Option<Rank> {
        match self {
            EventKind::PhaseStart => None,
            EventKind::Send { from, .. } => from.rank(),
            EventKind::Receive { to, .. } => Some(*to),
            EventKind::CompareSplit { rank, .. } => Some(*rank),
        }
    }

    /// Data carried by the event (empty for kinds without a payload).
    pub fn payload(&self) -> &[Value] {
        match self {
            EventKind::Send { payload, .. } | EventKind::Receive { payload, .. } => payload,
            EventKind::PhaseStart | EventKind::CompareSplit { .. } => &[],
        }
    }
}

/// An immutable, timestamped simulated occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    time: Duration,
    kind: EventKind,
}

impl Event {
    /// Create an event firing at `time`.
    pub fn new(time: Duration, kind: EventKind) -> Self {
        Self { time, kind }
    }

    /// Phase-start event.
    pub fn phase_start(time: Duration) -> Self {
        Self::new(time, EventKind::PhaseStart)
    }

    /// Compare-split event for `rank` in a phase of the given parity.
    pub fn compare_split(time: Duration, rank: Rank, parity: PhaseParity) -> Self {
        Self::new(time, EventKind::CompareSplit { rank, parity })
    }

    /// When this event fires.
    pub fn time(&self) -> Duration {
        self.time
    }

    /// What this event is.
    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// Consume the event, returning its kind.
    pub fn into_kind(self) -> EventKind {
        self.kind
    }
}

/// Render logical time as a plain number of units.
pub fn format_time(time: Duration) -> String {
    format!("{}", time.as_secs_f64())
}

/// Produce the stable textual record of a dispatched event.
///
/// ```text
/// Time: 3.5, Type: SEND, Src: 0, Dest: 1, Tag: 0
/// Data: [4, 8, 15]
/// ```
pub fn describe(event: &Event, now: Duration) -> String {
    let kind = event.kind();
    let endpoints = match kind {
        EventKind::PhaseStart => format!("Src: {}, Dest: ALL, Tag: 0", Sender::System),
        EventKind::Send { from, to, tag, .. } | EventKind::Receive { from, to, tag, .. } => {
            format!("Src: {}, Dest: {}, Tag: {}", from, to, tag)
        }
        EventKind::CompareSplit { rank, parity } => {
            format!("Src: {}, Phase: {}, Tag: 0", rank, parity)
        }
    };
    let data = kind
        .payload()
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Time: {}, Type: {}, {}\nData: [{}]\n",
        format_time(now),
        kind.type_name(),
        endpoints,
        data
    )
}

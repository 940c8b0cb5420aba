//! Event queue with deterministic ordering.

use oddeven_core::{Event, EventPriority};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::time::Duration;

/// Key for ordering events in the queue.
///
/// Events are ordered by:
/// 1. Time (earlier first)
/// 2. Priority (phase before network before compute)
/// 3. Rank of the process concerned (deterministic ordering)
/// 4. Sequence number (FIFO for same time/priority/rank)
///
/// Only the time order is part of the queue's contract; the rest makes ties
/// reproducible.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EventKey {
    /// When this event should be processed.
    pub time: Duration,
    /// Priority for ordering at same time.
    pub priority: EventPriority,
    /// Rank of the process the event concerns (0 for system events).
    pub rank: u32,
    /// Sequence number for deterministic FIFO ordering.
    pub sequence: u64,
}

impl EventKey {
    /// Create a new event key for an [`Event`].
    pub fn new(event: &Event, sequence: u64) -> Self {
        Self {
            time: event.time(),
            priority: event.kind().priority(),
            rank: event.kind().process().map_or(0, |rank| rank.get()),
            sequence,
        }
    }
}

impl Ord for EventKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // Order by time first
        match self.time.cmp(&other.time) {
            Ordering::Equal => {}
            ord => return ord,
        }

        match self.priority.cmp(&other.priority) {
            Ordering::Equal => {}
            ord => return ord,
        }

        match self.rank.cmp(&other.rank) {
            Ordering::Equal => {}
            ord => return ord,
        }

        // Finally by sequence (FIFO)
        self.sequence.cmp(&other.sequence)
    }
}

impl PartialOrd for EventKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Time-ordered queue of pending events.
///
/// There is no cancellation: a scheduled event always fires.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: BTreeMap<EventKey, Event>,
    sequence: u64,
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an event. O(log n).
    pub fn schedule(&mut self, event: Event) {
        let key = EventKey::new(&event, self.sequence);
        self.sequence += 1;
        self.events.insert(key, event);
    }

    /// Remove and return the earliest event.
    pub fn pop_earliest(&mut self) -> Option<Event> {
        self.events.pop_first().map(|(_, event)| event)
    }

    /// Time of the earliest pending event.
    pub fn peek_time(&self) -> Option<Duration> {
        self.events.keys().next().map(|key| key.time)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether every scheduled event has fired.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

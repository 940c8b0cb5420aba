//! Hooks between the simulation engine and its callers.

use crate::Event;
use std::time::Duration;

/// Receives every event the engine dispatches.
///
/// Invoked once per event, after the event has been handled, with the
/// simulation time at dispatch and the event's [`describe`](crate::describe)
/// text. The engine itself never performs I/O; writing the records anywhere
/// is the observer's job.
///
/// Implemented for any `FnMut(&Event, Duration, &str)` closure.
pub trait DispatchObserver {
    /// Called after `event` was handled at simulation time `now`.
    fn on_dispatch(&mut self, event: &Event, now: Duration, record: &str);
}

impl<F> DispatchObserver for F
where
    F: FnMut(&Event, Duration, &str),
{
    fn on_dispatch(&mut self, event: &Event, now: Duration, record: &str) {
        self(event, now, record)
    }
}

/// Observer that discards every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl DispatchObserver for NoopObserver {
    fn on_dispatch(&mut self, _event: &Event, _now: Duration, _record: &str) {}
}

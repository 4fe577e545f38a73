//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::time::Duration;

use rowedit::{EditingSession, EventRecorder, VirtualClock};

pub type TestSession = EditingSession<EventRecorder, VirtualClock>;

/// Create a session with a recording delegate and a virtual clock handle
pub fn test_session() -> (TestSession, VirtualClock) {
    let clock = VirtualClock::new();
    let session = EditingSession::new(EventRecorder::new(), clock.clone());
    (session, clock)
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Advance virtual time and deliver every due tick to the session.
/// Returns how many ticks produced an auto-save.
pub fn run_clock(session: &mut TestSession, clock: &VirtualClock, by: Duration) -> usize {
    clock
        .advance(by)
        .into_iter()
        .filter(|handle| session.handle_tick(*handle))
        .count()
}

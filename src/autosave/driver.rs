//! Timer capability used by the scheduler.

use std::fmt;
use std::time::Duration;

/// Identity of one armed timer. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AutoSaveHandle(pub u64);

impl fmt::Display for AutoSaveHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Source of repeating ticks.
///
/// `start` begins delivering `handle` every `interval`; delivery mechanism is
/// up to the driver. `stop` destroys the timer and must be safe for handles
/// that were already stopped or never started.
pub trait TimerDriver {
    fn start(&mut self, handle: AutoSaveHandle, interval: Duration);
    fn stop(&mut self, handle: AutoSaveHandle);
}

impl<T: TimerDriver + ?Sized> TimerDriver for Box<T> {
    fn start(&mut self, handle: AutoSaveHandle, interval: Duration) {
        (**self).start(handle, interval)
    }

    fn stop(&mut self, handle: AutoSaveHandle) {
        (**self).stop(handle)
    }
}

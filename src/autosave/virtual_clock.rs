//! Deterministic virtual time.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use super::driver::{AutoSaveHandle, TimerDriver};

#[derive(Debug, Default)]
struct ClockState {
    now: Duration,
    /// handle -> (interval, next due time)
    timers: BTreeMap<AutoSaveHandle, (Duration, Duration)>,
}

/// A [`TimerDriver`] driven by hand.
///
/// Cloning yields another handle to the same clock, so a test can keep one
/// clone while the scheduler owns another.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    state: Rc<RefCell<ClockState>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since creation
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Number of running timers
    pub fn active_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Move time forward by `by`, returning every tick that came due in
    /// firing order. Ties fire in handle order.
    pub fn advance(&self, by: Duration) -> Vec<AutoSaveHandle> {
        let mut state = self.state.borrow_mut();
        let target = state.now + by;
        let mut fired = Vec::new();

        loop {
            let next = state
                .timers
                .iter()
                .filter(|(_, (_, due))| *due <= target)
                .min_by_key(|(handle, (_, due))| (*due, **handle))
                .map(|(handle, (interval, due))| (*handle, *interval, *due));

            let Some((handle, interval, due)) = next else {
                break;
            };
            state.now = due;
            state.timers.insert(handle, (interval, due + interval));
            fired.push(handle);
        }

        state.now = target;
        fired
    }
}

impl TimerDriver for VirtualClock {
    fn start(&mut self, handle: AutoSaveHandle, interval: Duration) {
        let mut state = self.state.borrow_mut();
        if interval.is_zero() {
            tracing::warn!("Refusing to start {} with a zero interval", handle);
            state.timers.remove(&handle);
            return;
        }
        let due = state.now + interval;
        state.timers.insert(handle, (interval, due));
    }

    fn stop(&mut self, handle: AutoSaveHandle) {
        self.state.borrow_mut().timers.remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_fires_in_order() {
        let mut clock = VirtualClock::new();
        clock.start(AutoSaveHandle(1), Duration::from_millis(30));
        clock.start(AutoSaveHandle(2), Duration::from_millis(20));

        let fired = clock.advance(Duration::from_millis(60));
        let ids: Vec<u64> = fired.iter().map(|h| h.0).collect();
        // t=20:2, t=30:1, t=40:2, t=60:1 and 2 (tie by handle)
        assert_eq!(ids, vec![2, 1, 2, 1, 2]);
        assert_eq!(clock.now(), Duration::from_millis(60));
    }

    #[test]
    fn test_nothing_due_before_interval() {
        let mut clock = VirtualClock::new();
        clock.start(AutoSaveHandle(1), Duration::from_millis(100));
        assert!(clock.advance(Duration::from_millis(99)).is_empty());
        assert_eq!(clock.advance(Duration::from_millis(1)).len(), 1);
    }

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut clock = VirtualClock::new();
        clock.start(AutoSaveHandle(7), Duration::from_millis(10));
        clock.stop(AutoSaveHandle(7));
        clock.stop(AutoSaveHandle(7));
        assert!(clock.advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_zero_interval_is_not_started() {
        let mut clock = VirtualClock::new();
        clock.start(AutoSaveHandle(1), Duration::ZERO);
        assert_eq!(clock.active_timers(), 0);
        assert!(clock.advance(Duration::from_millis(1)).is_empty());
        assert_eq!(clock.now(), Duration::from_millis(1));
    }
}

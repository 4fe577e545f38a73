//! AutoSaveScheduler - owns the single live auto-save timer.

use std::time::Duration;

use super::driver::{AutoSaveHandle, TimerDriver};

/// Owns at most one armed timer at any instant.
#[derive(Debug)]
pub struct AutoSaveScheduler<T: TimerDriver> {
    driver: T,
    /// Live timer and its period
    live: Option<(AutoSaveHandle, Duration)>,
    next_handle: u64,
}

impl<T: TimerDriver> AutoSaveScheduler<T> {
    pub fn new(driver: T) -> Self {
        Self {
            driver,
            live: None,
            next_handle: 1,
        }
    }

    /// Start a repeating timer, destroying any timer already armed.
    ///
    /// A zero interval leaves the scheduler disarmed and returns None.
    pub fn arm(&mut self, interval: Duration) -> Option<AutoSaveHandle> {
        self.disarm();

        if interval.is_zero() {
            tracing::warn!("Refusing to arm auto-save with a zero interval");
            return None;
        }

        let handle = AutoSaveHandle(self.next_handle);
        self.next_handle += 1;
        self.driver.start(handle, interval);
        self.live = Some((handle, interval));
        tracing::debug!("Armed auto-save {} every {:?}", handle, interval);
        Some(handle)
    }

    /// Destroy the live timer. Idempotent.
    pub fn disarm(&mut self) {
        if let Some((handle, _)) = self.live.take() {
            self.driver.stop(handle);
            tracing::debug!("Disarmed auto-save {}", handle);
        }
    }

    pub fn is_armed(&self) -> bool {
        self.live.is_some()
    }

    /// Handle of the live timer
    pub fn handle(&self) -> Option<AutoSaveHandle> {
        self.live.map(|(handle, _)| handle)
    }

    pub fn interval(&self) -> Option<Duration> {
        self.live.map(|(_, interval)| interval)
    }

    /// True if `handle` belongs to the live timer
    pub fn accepts(&self, handle: AutoSaveHandle) -> bool {
        self.handle() == Some(handle)
    }

    /// Run `on_tick` if `handle` is the live timer. Ticks from destroyed
    /// timers are dropped and `false` is returned.
    pub fn fire<F: FnOnce()>(&self, handle: AutoSaveHandle, on_tick: F) -> bool {
        if !self.accepts(handle) {
            tracing::trace!("Dropping stale tick from {}", handle);
            return false;
        }
        on_tick();
        true
    }

    pub fn driver(&self) -> &T {
        &self.driver
    }
}

impl<T: TimerDriver> Drop for AutoSaveScheduler<T> {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autosave::VirtualClock;
    use std::cell::Cell;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_arm_and_fire() {
        let clock = VirtualClock::new();
        let mut scheduler = AutoSaveScheduler::new(clock.clone());
        let handle = scheduler.arm(ms(100)).unwrap();

        let fired = Cell::new(0);
        for tick in clock.advance(ms(250)) {
            scheduler.fire(tick, || fired.set(fired.get() + 1));
        }
        assert_eq!(fired.get(), 2);
        assert!(scheduler.accepts(handle));
    }

    #[test]
    fn test_rearm_replaces_timer() {
        let clock = VirtualClock::new();
        let mut scheduler = AutoSaveScheduler::new(clock.clone());
        let first = scheduler.arm(ms(100)).unwrap();
        let second = scheduler.arm(ms(250)).unwrap();

        assert_ne!(first, second);
        assert_eq!(scheduler.interval(), Some(ms(250)));
        assert_eq!(clock.active_timers(), 1);
        assert!(!scheduler.accepts(first));
        assert!(scheduler.accepts(second));
    }

    #[test]
    fn test_disarm_twice() {
        let clock = VirtualClock::new();
        let mut scheduler = AutoSaveScheduler::new(clock.clone());
        scheduler.arm(ms(100));
        scheduler.disarm();
        assert!(!scheduler.is_armed());
        assert_eq!(scheduler.interval(), None);
        scheduler.disarm();
        assert!(!scheduler.is_armed());
        assert_eq!(clock.active_timers(), 0);
    }

    #[test]
    fn test_stale_tick_is_dropped() {
        let clock = VirtualClock::new();
        let mut scheduler = AutoSaveScheduler::new(clock.clone());
        let handle = scheduler.arm(ms(10)).unwrap();
        let pending = clock.advance(ms(30));
        assert_eq!(pending.len(), 3);

        // Disarm after the first tick, as a tick handler would
        let fired = Cell::new(0);
        for (i, tick) in pending.into_iter().enumerate() {
            scheduler.fire(tick, || fired.set(fired.get() + 1));
            if i == 0 {
                scheduler.disarm();
            }
        }
        assert_eq!(fired.get(), 1);
        assert!(!scheduler.accepts(handle));
    }

    #[test]
    fn test_zero_interval_is_not_armed() {
        let clock = VirtualClock::new();
        let mut scheduler = AutoSaveScheduler::new(clock.clone());
        assert_eq!(scheduler.arm(Duration::ZERO), None);
        assert!(!scheduler.is_armed());
        assert_eq!(clock.active_timers(), 0);
    }

    #[test]
    fn test_drop_destroys_timer() {
        let clock = VirtualClock::new();
        {
            let mut scheduler = AutoSaveScheduler::new(clock.clone());
            scheduler.arm(ms(10));
            assert_eq!(clock.active_timers(), 1);
        }
        assert_eq!(clock.active_timers(), 0);
        assert!(clock.advance(ms(100)).is_empty());
    }
}

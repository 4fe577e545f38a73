//! Real-time timer backed by sleeper threads.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use super::driver::{AutoSaveHandle, TimerDriver};

/// A [`TimerDriver`] that spawns one thread per armed timer.
///
/// Ticks are sent to the [`Receiver`] returned by [`ThreadTimer::new`]; the
/// owning loop hands them back to the session. Stopping a timer drops its
/// stop channel, which wakes and ends the thread.
#[derive(Debug)]
pub struct ThreadTimer {
    tick_tx: Sender<AutoSaveHandle>,
    running: HashMap<AutoSaveHandle, Sender<()>>,
}

impl ThreadTimer {
    pub fn new() -> (Self, Receiver<AutoSaveHandle>) {
        let (tick_tx, tick_rx) = mpsc::channel();
        (
            Self {
                tick_tx,
                running: HashMap::new(),
            },
            tick_rx,
        )
    }

    /// Number of running timer threads
    pub fn active_timers(&self) -> usize {
        self.running.len()
    }
}

impl TimerDriver for ThreadTimer {
    fn start(&mut self, handle: AutoSaveHandle, interval: Duration) {
        self.stop(handle);
        if interval.is_zero() {
            tracing::warn!("Refusing to start {} with a zero interval", handle);
            return;
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let tick_tx = self.tick_tx.clone();
        thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    if tick_tx.send(handle).is_err() {
                        break;
                    }
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });
        self.running.insert(handle, stop_tx);
    }

    fn stop(&mut self, handle: AutoSaveHandle) {
        // Dropping the sender disconnects the thread's stop channel
        self.running.remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_arrive() {
        let (mut timer, ticks) = ThreadTimer::new();
        timer.start(AutoSaveHandle(1), Duration::from_millis(10));
        let tick = ticks.recv_timeout(Duration::from_millis(500)).unwrap();
        assert_eq!(tick, AutoSaveHandle(1));
        timer.stop(AutoSaveHandle(1));
        assert_eq!(timer.active_timers(), 0);
    }

    #[test]
    fn test_stop_ends_delivery() {
        let (mut timer, ticks) = ThreadTimer::new();
        timer.start(AutoSaveHandle(1), Duration::from_millis(10));
        ticks.recv_timeout(Duration::from_millis(500)).unwrap();
        timer.stop(AutoSaveHandle(1));

        // Ticks already in flight may still be queued; nothing new after that
        thread::sleep(Duration::from_millis(50));
        ticks.try_iter().for_each(drop);
        assert!(ticks.recv_timeout(Duration::from_millis(100)).is_err());
    }

    #[test]
    fn test_zero_interval_spawns_nothing() {
        let (mut timer, ticks) = ThreadTimer::new();
        timer.start(AutoSaveHandle(1), Duration::ZERO);
        assert_eq!(timer.active_timers(), 0);
        assert!(ticks.recv_timeout(Duration::from_millis(50)).is_err());
    }
}

//! Periodic auto-save scheduling.
//!
//! The scheduler owns at most one armed timer. Timers themselves come from an
//! injectable [`TimerDriver`]:
//!
//! - [`VirtualClock`]: deterministic virtual time, advanced by hand in tests
//! - [`ThreadTimer`]: real time, one sleeper thread per armed timer, ticks sent over a channel
//!
//! Ticks come back to the session's execution context as [`AutoSaveHandle`]
//! values. A tick whose handle is not the live one is dropped, so nothing from
//! a destroyed timer is ever observed.

mod driver;
mod scheduler;
mod thread_timer;
mod virtual_clock;

pub use driver::{AutoSaveHandle, TimerDriver};
pub use scheduler::AutoSaveScheduler;
pub use thread_timer::ThreadTimer;
pub use virtual_clock::VirtualClock;

//! rowedit - in-place editing for table rows
//!
//! This crate provides the editing core behind an editable table row: the
//! Idle/Editing session lifecycle, the validation pipeline that gates commits,
//! the periodic auto-save scheduler, and the delegate contract that keeps the
//! host's presentation layer in sync. Layout, styling and persistence belong
//! to the host.

pub mod autosave;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod counter;
pub mod messages;
pub mod notifier;
pub mod session;
pub mod tracing;
pub mod update;
pub mod validation;

// Re-export commonly used types
pub use autosave::{AutoSaveHandle, AutoSaveScheduler, ThreadTimer, TimerDriver, VirtualClock};
pub use config::{CharacterCountMode, EditingConfiguration};
pub use counter::CharacterCount;
pub use messages::EditMsg;
pub use notifier::{EditEvent, EditingDelegate, EventRecorder};
pub use session::{EditingSession, ReturnKeyOutcome, SessionState};
pub use validation::{validate, validate_all, Rule, ValidationError, ValidationOutcome};

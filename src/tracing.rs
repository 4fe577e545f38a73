//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! session transitions and auto-save timing.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=session=debug,message=debug` - scoped filtering
//! - `RUST_LOG=rowedit::autosave=trace` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/rowedit/logs/rowedit.log` with daily rotation.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::autosave::TimerDriver;
use crate::notifier::EditingDelegate;
use crate::session::EditingSession;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). File logging always
/// runs at debug level.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "rowedit.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // A subscriber may already be installed (tests, embedding hosts)
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of session state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub editing: bool,
    pub text_chars: usize,
    pub modified: bool,
    pub auto_save: Option<u64>,
}

impl SessionSnapshot {
    pub fn from_session<D: EditingDelegate, T: TimerDriver>(
        session: &EditingSession<D, T>,
    ) -> Self {
        Self {
            editing: session.is_editing(),
            text_chars: session.current_text().chars().count(),
            modified: session.is_modified(),
            auto_save: session.auto_save_handle().map(|h| h.0),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &SessionSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.editing != other.editing {
            let to = if other.editing { "editing" } else { "idle" };
            changes.push(format!("state → {}", to));
        }
        if self.text_chars != other.text_chars {
            changes.push(format!(
                "text: {} → {} chars",
                self.text_chars, other.text_chars
            ));
        }
        if self.modified != other.modified {
            changes.push(format!("modified: {}", other.modified));
        }
        if self.auto_save != other.auto_save {
            let describe = |h: Option<u64>| match h {
                Some(id) => format!("timer#{}", id),
                None => "off".to_string(),
            };
            changes.push(format!(
                "auto-save: {} → {}",
                describe(self.auto_save),
                describe(other.auto_save)
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

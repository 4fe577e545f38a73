//! EditingSession - the Idle/Editing state machine for one editable surface.
//!
//! A session is created once per surface and reused across many
//! begin/end cycles. It owns the original and current text, gates commits on
//! validation, keeps the auto-save timer armed while editing, and reports
//! everything to its [`EditingDelegate`].

use std::fmt;

use crate::autosave::{AutoSaveHandle, AutoSaveScheduler, TimerDriver};
use crate::config::EditingConfiguration;
use crate::counter::CharacterCount;
use crate::notifier::EditingDelegate;
use crate::validation::{validate, validate_all, Rule, ValidationError, ValidationOutcome};

/// State of an in-progress edit
#[derive(Debug, Clone)]
pub struct ActiveEdit {
    /// Text at the most recent `begin`; frozen until the session goes idle
    original: String,
    current: String,
    config: EditingConfiguration,
    /// Length bounds followed by the configured rules
    rules: Vec<Rule>,
}

impl ActiveEdit {
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn config(&self) -> &EditingConfiguration {
        &self.config
    }
}

#[derive(Debug, Clone)]
pub enum SessionState {
    Idle,
    Editing(ActiveEdit),
}

/// Why a transition request was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionRejected {
    EditingDisabled,
    AlreadyEditing,
    NotEditing,
}

impl fmt::Display for TransitionRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EditingDisabled => write!(f, "editing is disabled"),
            Self::AlreadyEditing => write!(f, "already editing"),
            Self::NotEditing => write!(f, "not editing"),
        }
    }
}

/// Result of a submit keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKeyOutcome {
    /// Host accepted the key and the commit succeeded
    Committed,
    /// Host accepted the key but validation rejected the commit
    Rejected,
    /// Host declined the key; editing continues
    Ignored,
    NotEditing,
}

/// One editable surface's editing lifecycle.
#[derive(Debug)]
pub struct EditingSession<D: EditingDelegate, T: TimerDriver> {
    state: SessionState,
    delegate: D,
    scheduler: AutoSaveScheduler<T>,
    /// Text shown while idle: the last committed text, or the original after cancel
    display_text: String,
}

impl<D: EditingDelegate, T: TimerDriver> EditingSession<D, T> {
    pub fn new(delegate: D, driver: T) -> Self {
        Self {
            state: SessionState::Idle,
            delegate,
            scheduler: AutoSaveScheduler::new(driver),
            display_text: String::new(),
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Enter editing with `initial_text`. Returns false (and changes nothing)
    /// if editing is disabled in `config` or a session is already active.
    pub fn begin(
        &mut self,
        initial_text: impl Into<String>,
        config: EditingConfiguration,
    ) -> bool {
        if !config.is_editing_enabled {
            reject("begin", TransitionRejected::EditingDisabled);
            return false;
        }
        if self.is_editing() {
            reject("begin", TransitionRejected::AlreadyEditing);
            return false;
        }

        let initial = initial_text.into();
        let rules = config.effective_rules();
        let interval = config.effective_auto_save_interval();
        self.display_text = initial.clone();
        self.state = SessionState::Editing(ActiveEdit {
            original: initial.clone(),
            current: initial,
            config,
            rules,
        });

        if let Some(interval) = interval {
            self.scheduler.arm(interval);
        }

        tracing::debug!(
            "Editing began ({} chars, auto-save {:?})",
            self.display_text.chars().count(),
            interval
        );
        self.delegate.on_begin();
        self.report_character_count();
        true
    }

    /// Replace the current text. Runs advisory validation, recomputes count
    /// figures and asks the host to remeasure when dynamic height is on.
    pub fn update_text(&mut self, new_text: impl Into<String>) -> bool {
        let SessionState::Editing(edit) = &mut self.state else {
            reject("update_text", TransitionRejected::NotEditing);
            return false;
        };

        edit.current = new_text.into();
        self.delegate.on_text_changed(&edit.current);

        // Advisory only: never blocks editing
        if let ValidationOutcome::Invalid(err) = validate(&edit.current, &edit.rules) {
            tracing::trace!("Advisory validation failed: {}", err);
            self.delegate.on_validation_failed(&err);
        }

        let dynamic_height = edit.config.dynamic_height_enabled;
        self.report_character_count();

        if dynamic_height {
            let text = self.current_text().to_string();
            if let Some(height) = self.delegate.measure_height(&text) {
                self.delegate.on_height_will_change(height);
            }
        }
        true
    }

    /// Validate and finish the edit. On failure the session stays in
    /// editing with its text untouched and the first failing rule is reported.
    pub fn commit(&mut self) -> bool {
        let SessionState::Editing(edit) = &self.state else {
            reject("commit", TransitionRejected::NotEditing);
            return false;
        };

        if let ValidationOutcome::Invalid(err) = validate(&edit.current, &edit.rules) {
            tracing::debug!("Commit rejected by rule #{}: {}", err.rule_index, err);
            self.delegate.on_validation_failed(&err);
            return false;
        }

        let Some(edit) = self.finish() else {
            return false;
        };
        tracing::debug!("Editing committed (modified: {})", edit.original != edit.current);
        self.display_text = edit.current;
        self.delegate.on_end(&self.display_text);
        true
    }

    /// Abandon the edit. Never validates; reports the original text as final.
    pub fn cancel(&mut self) -> bool {
        let Some(edit) = self.finish() else {
            reject("cancel", TransitionRejected::NotEditing);
            return false;
        };
        tracing::debug!("Editing cancelled");
        self.display_text = edit.original;
        self.delegate.on_end(&self.display_text);
        true
    }

    /// Submit keystroke: commits if the host accepts the key
    pub fn return_key_pressed(&mut self) -> ReturnKeyOutcome {
        if !self.is_editing() {
            reject("return_key_pressed", TransitionRejected::NotEditing);
            return ReturnKeyOutcome::NotEditing;
        }
        if !self.delegate.should_accept_return_key() {
            tracing::trace!("Return key declined by host");
            return ReturnKeyOutcome::Ignored;
        }
        if self.commit() {
            ReturnKeyOutcome::Committed
        } else {
            ReturnKeyOutcome::Rejected
        }
    }

    /// Force the session idle without emitting `on_end`, discarding any
    /// uncommitted edit. Used before the surface is destroyed or recycled.
    pub fn teardown(&mut self) {
        self.scheduler.disarm();
        if let Some(edit) = self.finish() {
            tracing::debug!(
                "Teardown discarded edit (modified: {})",
                edit.original != edit.current
            );
            self.display_text = edit.original;
        }
    }

    /// Deliver an auto-save tick. Returns true if `on_auto_save` was emitted.
    ///
    /// Ticks from timers that were already disarmed are dropped silently.
    pub fn handle_tick(&mut self, handle: AutoSaveHandle) -> bool {
        let Self {
            state,
            delegate,
            scheduler,
            ..
        } = self;

        match state {
            SessionState::Editing(edit) => {
                let mut saved = false;
                scheduler.fire(handle, || {
                    if delegate.should_auto_save() {
                        delegate.on_auto_save(&edit.current);
                        saved = true;
                    } else {
                        tracing::trace!("Auto-save skipped by host");
                    }
                });
                saved
            }
            SessionState::Idle => {
                let live = scheduler.accepts(handle);
                debug_assert!(!live, "live auto-save {} ticked while idle", handle);
                if live {
                    tracing::error!("Live auto-save {} ticked while idle", handle);
                    scheduler.disarm();
                } else {
                    tracing::trace!("Dropping tick from {} while idle", handle);
                }
                false
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn is_editing(&self) -> bool {
        matches!(self.state, SessionState::Editing(_))
    }

    /// Current buffer while editing; otherwise the text the surface displays
    pub fn current_text(&self) -> &str {
        match &self.state {
            SessionState::Editing(edit) => &edit.current,
            SessionState::Idle => &self.display_text,
        }
    }

    /// Text captured at `begin`, while editing
    pub fn original_text(&self) -> Option<&str> {
        self.active().map(ActiveEdit::original)
    }

    /// True while editing and the buffer differs from the original
    pub fn is_modified(&self) -> bool {
        self.active().is_some_and(|edit| edit.original != edit.current)
    }

    /// Every failing rule for the current text, in registration order
    pub fn diagnostics(&self) -> Vec<ValidationError> {
        match self.active() {
            Some(edit) => validate_all(&edit.current, &edit.rules),
            None => Vec::new(),
        }
    }

    /// Count figures for the current text, if a count mode is configured
    pub fn character_count(&self) -> Option<CharacterCount> {
        let edit = self.active()?;
        CharacterCount::compute(
            &edit.current,
            edit.config.character_count_mode,
            edit.config.max_length,
        )
    }

    pub fn configuration(&self) -> Option<&EditingConfiguration> {
        self.active().map(ActiveEdit::config)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Handle of the armed auto-save timer
    pub fn auto_save_handle(&self) -> Option<AutoSaveHandle> {
        self.scheduler.handle()
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    pub fn driver(&self) -> &T {
        self.scheduler.driver()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn active(&self) -> Option<&ActiveEdit> {
        match &self.state {
            SessionState::Editing(edit) => Some(edit),
            SessionState::Idle => None,
        }
    }

    /// Disarm the timer and move to idle, returning the finished edit
    fn finish(&mut self) -> Option<ActiveEdit> {
        self.scheduler.disarm();
        match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Editing(edit) => Some(edit),
            SessionState::Idle => None,
        }
    }

    fn report_character_count(&mut self) {
        if let Some(count) = self.character_count() {
            self.delegate.on_character_count_changed(count);
        }
    }
}

fn reject(operation: &str, reason: TransitionRejected) {
    tracing::debug!("{} ignored: {}", operation, reason);
}

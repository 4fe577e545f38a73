//! Change notification contract between an editing session and its host.
//!
//! Outbound events and inbound queries live on one trait, [`EditingDelegate`].
//! Every method has a default body (do nothing, or answer `true`/`None`), so
//! a host implements only what it cares about.

use crate::counter::CharacterCount;
use crate::validation::ValidationError;

/// Host side of an editing session.
pub trait EditingDelegate {
    /// Editing started
    fn on_begin(&mut self) {}

    /// The session's text buffer was replaced
    fn on_text_changed(&mut self, text: &str) {
        let _ = text;
    }

    /// The row is about to change height; emitted before layout settles
    fn on_height_will_change(&mut self, height: f32) {
        let _ = height;
    }

    /// A rule rejected the text (advisory while typing, authoritative on commit)
    fn on_validation_failed(&mut self, error: &ValidationError) {
        let _ = error;
    }

    /// Count figures changed (only when a count mode is configured)
    fn on_character_count_changed(&mut self, count: CharacterCount) {
        let _ = count;
    }

    /// Persist `text` now
    fn on_auto_save(&mut self, text: &str) {
        let _ = text;
    }

    /// Editing ended; `final_text` is the committed text, or the original on cancel
    fn on_end(&mut self, final_text: &str) {
        let _ = final_text;
    }

    /// Gate consulted on every auto-save tick
    fn should_auto_save(&mut self) -> bool {
        true
    }

    /// Whether a submit keystroke commits the edit
    fn should_accept_return_key(&mut self) -> bool {
        true
    }

    /// Height the host would lay `text` out at, if it sizes dynamically
    fn measure_height(&mut self, text: &str) -> Option<f32> {
        let _ = text;
        None
    }
}

/// Host that ignores every event and accepts every default
impl EditingDelegate for () {}

impl<D: EditingDelegate + ?Sized> EditingDelegate for Box<D> {
    fn on_begin(&mut self) {
        (**self).on_begin()
    }
    fn on_text_changed(&mut self, text: &str) {
        (**self).on_text_changed(text)
    }
    fn on_height_will_change(&mut self, height: f32) {
        (**self).on_height_will_change(height)
    }
    fn on_validation_failed(&mut self, error: &ValidationError) {
        (**self).on_validation_failed(error)
    }
    fn on_character_count_changed(&mut self, count: CharacterCount) {
        (**self).on_character_count_changed(count)
    }
    fn on_auto_save(&mut self, text: &str) {
        (**self).on_auto_save(text)
    }
    fn on_end(&mut self, final_text: &str) {
        (**self).on_end(final_text)
    }
    fn should_auto_save(&mut self) -> bool {
        (**self).should_auto_save()
    }
    fn should_accept_return_key(&mut self) -> bool {
        (**self).should_accept_return_key()
    }
    fn measure_height(&mut self, text: &str) -> Option<f32> {
        (**self).measure_height(text)
    }
}

/// One outbound event, as recorded by [`EventRecorder`]
#[derive(Debug, Clone, PartialEq)]
pub enum EditEvent {
    Begin,
    TextChanged(String),
    HeightWillChange(f32),
    ValidationFailed(ValidationError),
    CharacterCountChanged(CharacterCount),
    AutoSave(String),
    End(String),
}

impl EditEvent {
    /// Short event name for logs
    pub fn name(&self) -> &'static str {
        match self {
            EditEvent::Begin => "begin",
            EditEvent::TextChanged(_) => "text_changed",
            EditEvent::HeightWillChange(_) => "height_will_change",
            EditEvent::ValidationFailed(_) => "validation_failed",
            EditEvent::CharacterCountChanged(_) => "character_count_changed",
            EditEvent::AutoSave(_) => "auto_save",
            EditEvent::End(_) => "end",
        }
    }
}

/// Delegate that records events and answers queries from its fields
#[derive(Debug, Clone)]
pub struct EventRecorder {
    pub events: Vec<EditEvent>,
    pub auto_save_allowed: bool,
    pub accept_return_key: bool,
    /// Height reported per character, None disables measuring
    pub height_per_char: Option<f32>,
}

impl Default for EventRecorder {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            auto_save_allowed: true,
            accept_return_key: true,
            height_per_char: None,
        }
    }
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain recorded events
    pub fn take(&mut self) -> Vec<EditEvent> {
        std::mem::take(&mut self.events)
    }

    /// Texts delivered through `on_auto_save`
    pub fn auto_saves(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                EditEvent::AutoSave(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Texts delivered through `on_end`
    pub fn ends(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                EditEvent::End(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Messages delivered through `on_validation_failed`
    pub fn validation_messages(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                EditEvent::ValidationFailed(err) => Some(err.message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Names of recorded events, in order
    pub fn names(&self) -> Vec<&'static str> {
        self.events.iter().map(EditEvent::name).collect()
    }
}

impl EditingDelegate for EventRecorder {
    fn on_begin(&mut self) {
        self.events.push(EditEvent::Begin);
    }

    fn on_text_changed(&mut self, text: &str) {
        self.events.push(EditEvent::TextChanged(text.to_string()));
    }

    fn on_height_will_change(&mut self, height: f32) {
        self.events.push(EditEvent::HeightWillChange(height));
    }

    fn on_validation_failed(&mut self, error: &ValidationError) {
        self.events.push(EditEvent::ValidationFailed(error.clone()));
    }

    fn on_character_count_changed(&mut self, count: CharacterCount) {
        self.events.push(EditEvent::CharacterCountChanged(count));
    }

    fn on_auto_save(&mut self, text: &str) {
        self.events.push(EditEvent::AutoSave(text.to_string()));
    }

    fn on_end(&mut self, final_text: &str) {
        self.events.push(EditEvent::End(final_text.to_string()));
    }

    fn should_auto_save(&mut self) -> bool {
        self.auto_save_allowed
    }

    fn should_accept_return_key(&mut self) -> bool {
        self.accept_return_key
    }

    fn measure_height(&mut self, text: &str) -> Option<f32> {
        self.height_per_char
            .map(|per_char| per_char * text.chars().count() as f32)
    }
}

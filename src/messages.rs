//! Message types for the host-facing surface
//!
//! Everything the host tells a session flows through [`EditMsg`].

use crate::autosave::AutoSaveHandle;
use crate::config::EditingConfiguration;

/// Inbound host request
#[derive(Debug, Clone)]
pub enum EditMsg {
    /// User tapped into the row
    BeginEditing {
        initial_text: String,
        config: EditingConfiguration,
    },
    /// Editable surface content changed
    TextDidChange(String),
    /// Host detected a submit keystroke
    ReturnKeyPressed,
    CommitRequested,
    CancelRequested,
    /// Surface is about to be destroyed or recycled
    Teardown,
    /// A timer driver delivered a tick
    AutoSaveTick(AutoSaveHandle),
}

impl EditMsg {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            EditMsg::BeginEditing { .. } => "BeginEditing",
            EditMsg::TextDidChange(_) => "TextDidChange",
            EditMsg::ReturnKeyPressed => "ReturnKeyPressed",
            EditMsg::CommitRequested => "CommitRequested",
            EditMsg::CancelRequested => "CancelRequested",
            EditMsg::Teardown => "Teardown",
            EditMsg::AutoSaveTick(_) => "AutoSaveTick",
        }
    }

    /// Periodic messages that would flood debug logs
    pub fn is_noisy(&self) -> bool {
        matches!(self, EditMsg::AutoSaveTick(_))
    }
}

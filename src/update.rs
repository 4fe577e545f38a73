//! Update function for host messages
//!
//! All host-driven state changes flow through [`update`].

use crate::autosave::TimerDriver;
use crate::messages::EditMsg;
use crate::notifier::EditingDelegate;
use crate::session::{EditingSession, ReturnKeyOutcome};

#[cfg(debug_assertions)]
use crate::tracing::SessionSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

/// Apply a host message to the session.
///
/// Returns true if the message was acted on: a transition happened, text was
/// replaced, or a tick produced an auto-save. A return key press counts only
/// when it committed.
///
/// In debug builds, this wraps with tracing instrumentation.
#[inline]
pub fn update<D: EditingDelegate, T: TimerDriver>(
    session: &mut EditingSession<D, T>,
    msg: EditMsg,
) -> bool {
    #[cfg(debug_assertions)]
    {
        update_traced(session, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(session, msg)
    }
}

fn update_inner<D: EditingDelegate, T: TimerDriver>(
    session: &mut EditingSession<D, T>,
    msg: EditMsg,
) -> bool {
    match msg {
        EditMsg::BeginEditing {
            initial_text,
            config,
        } => session.begin(initial_text, config),
        EditMsg::TextDidChange(text) => session.update_text(text),
        EditMsg::ReturnKeyPressed => {
            session.return_key_pressed() == ReturnKeyOutcome::Committed
        }
        EditMsg::CommitRequested => session.commit(),
        EditMsg::CancelRequested => session.cancel(),
        EditMsg::Teardown => {
            session.teardown();
            true
        }
        EditMsg::AutoSaveTick(handle) => session.handle_tick(handle),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Logs the message and any session state change it caused.
#[cfg(debug_assertions)]
fn update_traced<D: EditingDelegate, T: TimerDriver>(
    session: &mut EditingSession<D, T>,
    msg: EditMsg,
) -> bool {
    let is_noisy = msg.is_noisy();
    let msg_name = msg.name();
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = SessionSnapshot::from_session(session);
    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let handled = update_inner(session, msg);

    let after = SessionSnapshot::from_session(session);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "session", %diff, "state changed");
    }

    handled
}

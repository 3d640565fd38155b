//! Submission gating for backstage forms
//!
//! Enter never submits a form. Submission is only ever explicit and only
//! proceeds once the form's whole validator chain passes.

use super::editor::BODY_FIELD;
use super::error::ValidationError;
use super::form_state::Form;
use super::snapshot::FormSnapshot;
use super::validator::run_chain;
use crate::platform::is_shortcut;
use crossterm::event::{KeyCode, KeyEvent};

/// What a key press means to a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIntent {
    /// Explicit submit (Ctrl+S)
    Submit,
    /// Enter inside the multiline body
    Newline,
    /// Enter inside a single-line field
    Suppressed,
    /// Anything else; handled by the caller
    Passthrough,
}

pub fn classify_key(key: &KeyEvent, in_multiline: bool) -> KeyIntent {
    match key.code {
        KeyCode::Char('s') | KeyCode::Char('S') if is_shortcut(key.modifiers) => KeyIntent::Submit,
        KeyCode::Enter if in_multiline => KeyIntent::Newline,
        KeyCode::Enter => KeyIntent::Suppressed,
        _ => KeyIntent::Passthrough,
    }
}

/// Run the full validator chain over the form's current contents
///
/// On success the snapshot is the exact payload to POST.
pub fn gate_submission(form: &dyn Form) -> Result<FormSnapshot, ValidationError> {
    let mut snapshot = form.snapshot();
    // The editor decides emptiness; a blank body reaches the chain as empty
    if let Some(body) = form.body() {
        if body.is_blank() {
            snapshot.set(BODY_FIELD, "");
        }
    }
    run_chain(form.kind().rules(), &snapshot)?;
    Ok(snapshot)
}

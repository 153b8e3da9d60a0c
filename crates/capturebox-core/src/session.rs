//! Per-render session notes.

use crate::ids::session_id;

/// Placeholder text shown with every session note unless configured otherwise.
pub const DEFAULT_NOTE_CONTENT: &str = "Your session is ready.";

/// A note shown on the capture page for one render. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionNote {
    pub id: String,
    pub content: String,
}

impl SessionNote {
    /// Create a note with a fresh random ID.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: session_id(),
            content: content.into(),
        }
    }
}

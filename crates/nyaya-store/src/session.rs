//! Session value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nyaya_common::{Author, Message, SessionId};

/// Title given to a session until one is derived from the first user message.
pub const DEFAULT_TITLE: &str = "New Chat";

const TITLE_MAX_CHARS: usize = 40;

/// One independent conversation thread with its own message history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub title: String,
    /// Conversation order = insertion order. Append-only: individual
    /// messages are never edited, reordered, or removed.
    pub messages: Vec<Message>,
    /// Sortable mutation timestamp; history listings order by this,
    /// most recent first.
    pub last_updated: DateTime<Utc>,
}

impl Session {
    pub(crate) fn new() -> Self {
        Self {
            id: SessionId::new(),
            title: DEFAULT_TITLE.to_string(),
            messages: Vec::new(),
            last_updated: Utc::now(),
        }
    }

    /// Lighter view for history listings (no message bodies).
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            message_count: self.messages.len(),
            last_updated: self.last_updated,
        }
    }

    /// Whether the title is still the creation-time placeholder.
    pub(crate) fn has_placeholder_title(&self) -> bool {
        self.title == DEFAULT_TITLE
    }
}

// Session equality is identity: two snapshots of the same conversation are
// the same session regardless of content.
impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Session {}

/// Summary of a session for history display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: SessionId,
    pub title: String,
    pub message_count: usize,
    pub last_updated: DateTime<Utc>,
}

/// Derive a session title from the first user message, truncated to a
/// displayable length.
pub(crate) fn derive_title(messages: &[Message]) -> Option<String> {
    let first_user = messages.iter().find(|m| m.author == Author::User)?;
    let content = first_user.content.trim();
    if content.is_empty() {
        return None;
    }

    let mut title: String = content.chars().take(TITLE_MAX_CHARS).collect();
    if content.chars().count() > TITLE_MAX_CHARS {
        title.push('…');
    }
    Some(title)
}

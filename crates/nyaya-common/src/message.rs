//! Chat message value types.

use serde::{Deserialize, Serialize};

/// Who produced a message. Matched exhaustively wherever messages are
/// rendered or turned into API requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Model,
    System,
}

/// A single chat message. Author and content never change after creation;
/// conversations only ever grow by appending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub author: Author,
    pub content: String,
    /// Creation time formatted for display (local time of day). Ordering
    /// uses the session's `last_updated` clock, never this string.
    pub timestamp: String,
}

impl Message {
    fn new(author: Author, content: impl Into<String>) -> Self {
        Self {
            author,
            content: content.into(),
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Author::User, content)
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self::new(Author::Model, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Author::System, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_author() {
        assert_eq!(Message::user("hi").author, Author::User);
        assert_eq!(Message::model("hello").author, Author::Model);
        assert_eq!(Message::system("notice").author, Author::System);
    }

    #[test]
    fn author_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Author::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Author::Model).unwrap(), "\"model\"");
        assert_eq!(serde_json::to_string(&Author::System).unwrap(), "\"system\"");
    }

    #[test]
    fn message_round_trip() {
        let msg = Message::user("What is bail?");
        let json = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back.author, Author::User);
        assert_eq!(back.content, "What is bail?");
        assert_eq!(back.timestamp, msg.timestamp);
    }

    #[test]
    fn timestamp_is_time_of_day() {
        let msg = Message::user("hi");
        // HH:MM:SS
        assert_eq!(msg.timestamp.len(), 8);
        assert_eq!(msg.timestamp.matches(':').count(), 2);
    }
}

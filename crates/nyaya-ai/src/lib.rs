//! Generation client for Nyaya.
//!
//! Adapts a session's conversation history into one request/response round
//! trip with the Gemini generation service. The client is stateless: the
//! remote service keeps no session memory, so every call carries the full
//! relevant history.

pub mod gemini;

use async_trait::async_trait;

use nyaya_common::Message;

pub use gemini::{GeminiClient, GeminiConfig};

#[async_trait]
pub trait AiClient: Send + Sync {
    /// Send the conversation history and return the reply text verbatim.
    ///
    /// Fails without a partial result; retry policy, if any, belongs to
    /// the caller.
    async fn send_message(&self, messages: &[Message]) -> Result<String, AiError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
}

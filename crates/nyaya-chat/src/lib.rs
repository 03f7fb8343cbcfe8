//! Turn orchestration for Nyaya.
//!
//! A `ChatService` executes exactly one user turn against one session, with
//! deterministic ordering of side effects: the user message is committed
//! before the generation call, and the reply (or a fixed failure notice) is
//! committed after it, so a session is never left with an unanswered user
//! message once a turn completes.

mod busy;
pub mod prompt;
mod service;

pub use prompt::SYSTEM_PROMPT;
pub use service::{ChatError, ChatService, FAILURE_NOTICE};

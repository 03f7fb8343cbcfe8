//! Session storage for Nyaya.
//!
//! A `SessionStore` is the single source of truth for all chat sessions and
//! for which one is active. Every mutating operation commits the whole
//! collection to disk before returning, so a crash immediately after a
//! successful call cannot lose the mutation.

mod persist;
mod session;
mod store;

pub use session::{Session, SessionSummary, DEFAULT_TITLE};
pub use store::SessionStore;

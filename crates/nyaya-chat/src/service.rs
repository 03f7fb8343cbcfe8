//! Chat service: session management plus the per-turn state machine.

use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use tracing::warn;

use nyaya_ai::AiClient;
use nyaya_common::{Message, SessionId, StoreError};
use nyaya_store::{Session, SessionStore, SessionSummary};

use crate::busy::BusyGuard;
use crate::prompt::compose_user_content;

/// Notice appended in place of a reply when generation fails. The raw error
/// is logged, never shown to the user.
pub const FAILURE_NOTICE: &str = "An unexpected error occurred. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("nothing to send")]
    EmptyInput,

    #[error("a turn is already in flight for this session")]
    Busy,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Coordinates the session store and the generation client.
///
/// The store lock is only held across synchronous store operations, never
/// across the generation call, so turns on different sessions may overlap.
/// Within one session the busy flag keeps turns strictly serialized.
pub struct ChatService {
    store: Mutex<SessionStore>,
    client: Arc<dyn AiClient>,
    busy: Mutex<HashMap<SessionId, Arc<AtomicBool>>>,
}

impl ChatService {
    pub fn new(store: SessionStore, client: Arc<dyn AiClient>) -> Self {
        Self {
            store: Mutex::new(store),
            client,
            busy: Mutex::new(HashMap::new()),
        }
    }

    /// Create a new empty session and make it current.
    pub fn new_session(&self) -> Result<Session, ChatError> {
        Ok(self.store.lock().unwrap().create_session()?)
    }

    /// Session summaries, most recently updated first.
    pub fn sessions(&self) -> Vec<SessionSummary> {
        self.store.lock().unwrap().list_sessions()
    }

    /// Make the given session current and return it.
    pub fn select(&self, id: &SessionId) -> Result<Session, ChatError> {
        Ok(self.store.lock().unwrap().select_session(id)?.clone())
    }

    /// Delete a session. Idempotent; also forgets its busy flag.
    pub fn delete(&self, id: &SessionId) -> Result<(), ChatError> {
        self.store.lock().unwrap().delete_session(id)?;
        self.busy.lock().unwrap().remove(id);
        Ok(())
    }

    pub fn current(&self) -> Option<Session> {
        self.store.lock().unwrap().current_session().cloned()
    }

    pub fn current_id(&self) -> Option<SessionId> {
        self.store.lock().unwrap().current_id().cloned()
    }

    /// Whether a turn is in flight for the session.
    pub fn is_busy(&self, id: &SessionId) -> bool {
        self.busy
            .lock()
            .unwrap()
            .get(id)
            .is_some_and(|flag| flag.load(std::sync::atomic::Ordering::Acquire))
    }

    /// Execute one user turn against the given session.
    ///
    /// Input must be non-empty after trimming unless an attachment name is
    /// present. Returns the appended reply message: MODEL text on success,
    /// the fixed SYSTEM notice when generation fails. Either way the
    /// session grows by exactly one USER and one reply message.
    pub async fn turn(
        &self,
        id: &SessionId,
        input: &str,
        attachment: Option<&str>,
    ) -> Result<Message, ChatError> {
        let trimmed = input.trim();
        if trimmed.is_empty() && attachment.is_none() {
            return Err(ChatError::EmptyInput);
        }

        let _guard = BusyGuard::acquire(self.busy_flag(id))?;

        let user = Message::user(compose_user_content(trimmed, attachment));

        // The user message is committed before the call; a later generation
        // failure must not lose it.
        let history = {
            let mut store = self.store.lock().unwrap();
            let mut messages = store.session(id)?.messages.clone();
            messages.push(user);
            store.update_session(id, messages.clone())?;
            messages
        };

        // Single suspension point of the turn.
        let reply = match self.client.send_message(&history).await {
            Ok(text) => Message::model(text),
            Err(e) => {
                warn!("generation failed: {e}");
                Message::system(FAILURE_NOTICE)
            }
        };

        // Re-fetch by id: the reply belongs to the session the turn started
        // on, not whichever session is current now. A mid-flight deletion
        // wins over the reply.
        {
            let mut store = self.store.lock().unwrap();
            let mut messages = store.session(id)?.messages.clone();
            messages.push(reply.clone());
            store.update_session(id, messages)?;
        }

        Ok(reply)
    }

    fn busy_flag(&self, id: &SessionId) -> Arc<AtomicBool> {
        self.busy
            .lock()
            .unwrap()
            .entry(id.clone())
            .or_insert_with(|| Arc::new(AtomicBool::new(false)))
            .clone()
    }
}

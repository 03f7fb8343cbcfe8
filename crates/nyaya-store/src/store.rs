//! Session store: lifecycle operations over the persisted collection.

use std::path::PathBuf;

use chrono::Utc;
use tracing::debug;

use nyaya_common::{Message, SessionId, StoreError};

use crate::persist::{self, StoreData};
use crate::session::{derive_title, Session, SessionSummary};

/// Single source of truth for all sessions and which one is active.
///
/// Every mutating operation durably commits the whole collection before
/// returning. Other components never mutate session message sequences
/// directly; they go through [`SessionStore::update_session`].
pub struct SessionStore {
    data: StoreData,
    path: PathBuf,
}

impl SessionStore {
    /// Open the store backed by the given file, reconstructing the
    /// collection from prior state. Never fails: absent or malformed state
    /// yields an empty collection.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = persist::load(&path);
        Self { data, path }
    }

    /// Allocate a new empty session, make it current, and persist.
    pub fn create_session(&mut self) -> Result<Session, StoreError> {
        let session = Session::new();
        let id = session.id.clone();
        self.data.sessions.insert(id.clone(), session.clone());
        self.data.current = Some(id.clone());
        self.persist()?;
        debug!(%id, "created session");
        Ok(session)
    }

    /// Session summaries ordered by `last_updated`, most recent first.
    pub fn list_sessions(&self) -> Vec<SessionSummary> {
        let mut summaries: Vec<SessionSummary> =
            self.data.sessions.values().map(Session::summary).collect();
        summaries.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        summaries
    }

    /// Make the given session current.
    ///
    /// Fails with `NotFound` if the id is absent; the store is unchanged in
    /// that case.
    pub fn select_session(&mut self, id: &SessionId) -> Result<&Session, StoreError> {
        if !self.data.sessions.contains_key(id) {
            return Err(StoreError::NotFound(id.clone()));
        }
        self.data.current = Some(id.clone());
        self.persist()?;
        Ok(&self.data.sessions[id])
    }

    /// Replace the session's message sequence after a turn completes.
    ///
    /// Bumps `last_updated`, derives the title from the first user message
    /// while the title is still the placeholder, and persists.
    pub fn update_session(
        &mut self,
        id: &SessionId,
        messages: Vec<Message>,
    ) -> Result<(), StoreError> {
        let session = self
            .data
            .sessions
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        session.messages = messages;
        session.last_updated = Utc::now();
        if session.has_placeholder_title() {
            if let Some(title) = derive_title(&session.messages) {
                session.title = title;
            }
        }
        self.persist()
    }

    /// Remove a session. Deleting the current session clears the current
    /// pointer. Deleting an absent id is a no-op, not an error.
    pub fn delete_session(&mut self, id: &SessionId) -> Result<(), StoreError> {
        if self.data.sessions.remove(id).is_none() {
            return Ok(());
        }
        if self.data.current.as_ref() == Some(id) {
            self.data.current = None;
        }
        self.persist()?;
        debug!(%id, "deleted session");
        Ok(())
    }

    /// Look up a session by id.
    pub fn session(&self, id: &SessionId) -> Result<&Session, StoreError> {
        self.data
            .sessions
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    pub fn current_id(&self) -> Option<&SessionId> {
        self.data.current.as_ref()
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.data
            .current
            .as_ref()
            .and_then(|id| self.data.sessions.get(id))
    }

    pub fn len(&self) -> usize {
        self.data.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.sessions.is_empty()
    }

    fn persist(&self) -> Result<(), StoreError> {
        persist::save(&self.path, &self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::DEFAULT_TITLE;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> SessionStore {
        SessionStore::open(dir.path().join("sessions.json"))
    }

    #[test]
    fn create_session_is_empty_and_current() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        assert!(store.is_empty());

        let session = store.create_session().unwrap();
        assert!(session.messages.is_empty());
        assert_eq!(session.title, DEFAULT_TITLE);
        assert_eq!(store.current_id(), Some(&session.id));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn collection_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let (kept, dropped) = {
            let mut store = open_store(&dir);
            let a = store.create_session().unwrap();
            let b = store.create_session().unwrap();
            store
                .update_session(&a.id, vec![Message::user("What is bail?")])
                .unwrap();
            store.delete_session(&b.id).unwrap();
            (a.id, b.id)
        };

        let store = open_store(&dir);
        assert_eq!(store.len(), 1);
        let session = store.session(&kept).unwrap();
        assert_eq!(session.messages.len(), 1);
        assert_eq!(session.title, "What is bail?");
        assert!(store.session(&dropped).is_err());
    }

    #[test]
    fn current_pointer_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let selected = {
            let mut store = open_store(&dir);
            let a = store.create_session().unwrap();
            let _b = store.create_session().unwrap();
            store.select_session(&a.id).unwrap();
            a.id
        };

        let store = open_store(&dir);
        assert_eq!(store.current_id(), Some(&selected));
    }

    #[test]
    fn list_orders_by_last_updated_descending() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);

        let older = store.create_session().unwrap();
        let newer = store.create_session().unwrap();

        let listed = store.list_sessions();
        assert_eq!(listed[0].id, newer.id);
        assert_eq!(listed[1].id, older.id);

        // Updating the older session moves it to the front.
        store
            .update_session(&older.id, vec![Message::user("hello")])
            .unwrap();
        let listed = store.list_sessions();
        assert_eq!(listed[0].id, older.id);
    }

    #[test]
    fn select_missing_session_fails_and_leaves_store_unchanged() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        let session = store.create_session().unwrap();

        let missing = SessionId::new();
        let result = store.select_session(&missing);
        assert!(matches!(result, Err(StoreError::NotFound(_))));
        assert_eq!(store.current_id(), Some(&session.id));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_missing_session_fails() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        let result = store.update_session(&SessionId::new(), vec![]);
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn update_bumps_last_updated() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        let session = store.create_session().unwrap();
        let before = session.last_updated;

        store
            .update_session(&session.id, vec![Message::user("hi")])
            .unwrap();
        let after = store.session(&session.id).unwrap().last_updated;
        assert!(after >= before);
    }

    #[test]
    fn title_derived_once_from_first_user_message() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        let session = store.create_session().unwrap();

        let first = vec![Message::user("What is bail?")];
        store.update_session(&session.id, first.clone()).unwrap();
        assert_eq!(store.session(&session.id).unwrap().title, "What is bail?");

        // A later update must not re-derive the title.
        let mut grown = first;
        grown.push(Message::model("Bail is..."));
        grown.push(Message::user("Different question"));
        store.update_session(&session.id, grown).unwrap();
        assert_eq!(store.session(&session.id).unwrap().title, "What is bail?");
    }

    #[test]
    fn delete_current_clears_pointer_and_listing() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        let session = store.create_session().unwrap();

        store.delete_session(&session.id).unwrap();
        assert!(store.current_id().is_none());
        assert!(store.current_session().is_none());
        assert!(store.list_sessions().is_empty());
    }

    #[test]
    fn delete_non_current_keeps_pointer() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        let a = store.create_session().unwrap();
        let b = store.create_session().unwrap();
        store.select_session(&a.id).unwrap();

        store.delete_session(&b.id).unwrap();
        assert_eq!(store.current_id(), Some(&a.id));
    }

    #[test]
    fn delete_missing_session_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store.create_session().unwrap();

        assert!(store.delete_session(&SessionId::new()).is_ok());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn malformed_file_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sessions.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = SessionStore::open(path);
        assert!(store.is_empty());
        assert!(store.current_id().is_none());
    }
}

//! Durable storage for the session collection.
//!
//! The stored value is one JSON snapshot of the whole collection plus the
//! current-session pointer. Writes go to a `.tmp` file first and are renamed
//! into place to prevent corruption if the process crashes mid-write.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use nyaya_common::{SessionId, StoreError};

use crate::session::Session;

/// Serialized form of the session collection.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct StoreData {
    pub(crate) sessions: HashMap<SessionId, Session>,
    pub(crate) current: Option<SessionId>,
}

/// Read the collection from disk.
///
/// An absent file yields an empty collection; malformed state is discarded
/// with a warning, never fatal.
pub(crate) fn load(path: &Path) -> StoreData {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("no session file at {}, starting empty", path.display());
            return StoreData::default();
        }
        Err(e) => {
            warn!("failed to read {}: {e} — starting empty", path.display());
            return StoreData::default();
        }
    };

    match serde_json::from_str::<StoreData>(&content) {
        Ok(mut data) => {
            // The current pointer must reference an existing entry.
            if let Some(ref current) = data.current {
                if !data.sessions.contains_key(current) {
                    warn!("current session {current} missing from stored collection, clearing");
                    data.current = None;
                }
            }
            info!(
                sessions = data.sessions.len(),
                "loaded sessions from {}",
                path.display()
            );
            data
        }
        Err(e) => {
            warn!(
                "malformed session file {}: {e} — discarding and starting empty",
                path.display()
            );
            StoreData::default()
        }
    }
}

/// Write the collection to disk, atomically.
pub(crate) fn save(path: &Path, data: &StoreData) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| StoreError::Persistence(format!("failed to serialize sessions: {e}")))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            StoreError::Persistence(format!(
                "failed to create data directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    // Atomic write: write to .tmp, then rename
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, &json).map_err(|e| {
        StoreError::Persistence(format!("failed to write {}: {e}", tmp_path.display()))
    })?;

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        // Rename failed — try direct write as fallback (Windows compat)
        warn!("atomic rename failed ({e}), falling back to direct write");
        std::fs::write(path, &json).map_err(|e2| {
            StoreError::Persistence(format!("failed to write {}: {e2}", path.display()))
        })?;
    }

    tracing::debug!(path = %path.display(), "sessions saved to disk");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_absent_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let data = load(&dir.path().join("sessions.json"));
        assert!(data.sessions.is_empty());
        assert!(data.current.is_none());
    }

    #[test]
    fn load_malformed_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");
        std::fs::write(&path, "{ not json").unwrap();

        let data = load(&path);
        assert!(data.sessions.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");

        let mut data = StoreData::default();
        let session = Session::new();
        data.current = Some(session.id.clone());
        data.sessions.insert(session.id.clone(), session.clone());

        save(&path, &data).unwrap();
        let loaded = load(&path);

        assert_eq!(loaded.sessions.len(), 1);
        assert_eq!(loaded.current, Some(session.id.clone()));
        assert_eq!(loaded.sessions[&session.id].title, session.title);
    }

    #[test]
    fn save_creates_parent_dirs_and_cleans_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sessions.json");

        save(&path, &StoreData::default()).unwrap();

        assert!(path.exists());
        assert!(
            !path.with_extension("json.tmp").exists(),
            "tmp file should be cleaned up after rename"
        );
    }

    #[test]
    fn load_clears_dangling_current_pointer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");

        let mut data = StoreData::default();
        data.current = Some(SessionId::new());
        save(&path, &data).unwrap();

        let loaded = load(&path);
        assert!(loaded.current.is_none());
    }
}

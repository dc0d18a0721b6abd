//! Durable client-local identity.
//!
//! Stores the current `(participant_id, session_id)` pair in a small JSON
//! file so it survives process restarts. A client profile is in at most one
//! workspace at a time. Persistence is best-effort: a failed write is
//! logged and swallowed, and the in-memory pair stays authoritative for the
//! rest of the session.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use retroboard_core::types::DbId;

/// The persisted identity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub participant_id: DbId,
    pub session_id: DbId,
}

/// File-backed identity store with an in-memory working copy.
pub struct IdentityStore {
    path: PathBuf,
    current: Mutex<Option<Identity>>,
}

impl IdentityStore {
    /// Open the store at `path`, loading any persisted identity.
    ///
    /// A missing file means no identity; an unreadable or unparsable file
    /// is treated the same way, with a warning.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = load_identity(&path);
        Self {
            path,
            current: Mutex::new(current),
        }
    }

    /// The default per-profile location, under the user data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("retroboard")
            .join("identity.json")
    }

    /// Overwrite the stored pair. Idempotent; persists best-effort.
    pub fn set(&self, participant_id: DbId, session_id: DbId) {
        let identity = Identity {
            participant_id,
            session_id,
        };
        *self.current.lock().expect("identity lock poisoned") = Some(identity);
        self.persist(Some(&identity));
    }

    /// Reset to empty, used on explicit logout.
    pub fn clear(&self) {
        *self.current.lock().expect("identity lock poisoned") = None;
        if let Err(err) = std::fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), %err, "Failed to remove identity file");
            }
        }
    }

    /// The current pair, or `None` when no identity is held. Pure read.
    pub fn current(&self) -> Option<Identity> {
        *self.current.lock().expect("identity lock poisoned")
    }

    fn persist(&self, identity: Option<&Identity>) {
        let Some(identity) = identity else { return };
        let result = self
            .path
            .parent()
            .map(std::fs::create_dir_all)
            .unwrap_or(Ok(()))
            .and_then(|_| {
                let json = serde_json::to_string_pretty(identity)?;
                std::fs::write(&self.path, json)
            });
        if let Err(err) = result {
            // Best-effort only; the in-memory pair remains valid.
            tracing::warn!(path = %self.path.display(), %err, "Failed to persist identity");
        }
    }
}

fn load_identity(path: &Path) -> Option<Identity> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), %err, "Failed to read identity file");
            }
            return None;
        }
    };
    match serde_json::from_str(&contents) {
        Ok(identity) => Some(identity),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "Ignoring corrupt identity file");
            None
        }
    }
}

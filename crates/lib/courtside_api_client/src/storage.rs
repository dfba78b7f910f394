//! Persistent client-side token storage.
//!
//! The token manager is the only intended reader and writer; everything
//! else asks the manager for a bearer header.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt session file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything the client persists about a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub bundle: Option<crate::models::TokenBundle>,
    pub last_activity: Option<DateTime<Utc>>,
}

pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Result<StoredSession, StorageError>;
    fn save(&self, session: &StoredSession) -> Result<(), StorageError>;

    /// Forget the bundle and the activity timestamp.
    fn clear(&self) -> Result<(), StorageError> {
        self.save(&StoredSession::default())
    }
}

/// Process-local storage.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    inner: Mutex<StoredSession>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing session.
    pub fn with_session(session: StoredSession) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Result<StoredSession, StorageError> {
        Ok(self.inner.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, session: &StoredSession) -> Result<(), StorageError> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = session.clone();
        Ok(())
    }
}

/// JSON file storage, shared by every process that points at the same path.
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$DATA_DIR/courtside/session.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("courtside").join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Result<StoredSession, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(StoredSession::default()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(StoredSession::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, session: &StoredSession) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // Write-then-rename so a concurrent reader never sees half a file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(session)?)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o600))?;
        }
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::User;

/// Key under which the email is persisted.
pub const SESSION_KEY: &str = "userEmail";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to access session file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode session: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// What survives a restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "userEmail")]
    pub email: String,
}

/// Key-value storage for the current session.
pub trait SessionStore: Send {
    fn save(&self, user: &User) -> Result<(), SessionError>;

    /// Stored session, or `None` when nobody is logged in.
    fn load(&self) -> Result<Option<SessionRecord>, SessionError>;

    fn clear(&self) -> Result<(), SessionError>;
}

/// Session persisted as `{"userEmail": "..."}` in a JSON file.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<data_dir>/qrquest/session.json`, falling back to the current directory.
    pub fn default_path() -> PathBuf {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.join("qrquest").join("session.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, user: &User) -> Result<(), SessionError> {
        let record = SessionRecord {
            email: user.email.clone(),
        };
        let content = serde_json::to_vec_pretty(&record)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        // Write to a sibling file and rename so a crash never leaves half a record.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        tracing::debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    fn load(&self) -> Result<Option<SessionRecord>, SessionError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        match serde_json::from_str::<SessionRecord>(&content) {
            Ok(record) if !record.email.trim().is_empty() => Ok(Some(record)),
            Ok(_) => Ok(None),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "Ignoring unreadable session file"
                );
                Ok(None)
            }
        }
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// Session kept for the lifetime of the process only.
#[derive(Default)]
pub struct MemorySessionStore {
    email: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, user: &User) -> Result<(), SessionError> {
        *self.email.lock() = Some(user.email.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<SessionRecord>, SessionError> {
        Ok(self
            .email
            .lock()
            .clone()
            .filter(|email| !email.trim().is_empty())
            .map(|email| SessionRecord { email }))
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.email.lock() = None;
        Ok(())
    }
}

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Holder of the single opaque session token
pub trait TokenStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn save_token(&self, token: &str) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;

    fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionFile {
    pub token: Option<String>,
    pub saved_at: Option<DateTime<Utc>>,
}

/// Token persisted as `session.json` in the CLI configuration directory
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(config_dir: impl AsRef<Path>) -> Self {
        Self {
            path: config_dir.as_ref().join("session.json"),
        }
    }

    /// Store in the configured directory, or `$HOME/.config/projcart`
    pub fn from_config() -> Result<Self, SessionError> {
        Ok(Self::new(get_config_dir()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<SessionFile, SessionError> {
        if !self.path.exists() {
            return Ok(SessionFile::default());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn store(&self, session: &SessionFile) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn token(&self) -> Option<String> {
        match self.load() {
            Ok(session) => session.token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save_token(&self, token: &str) -> Result<(), SessionError> {
        self.store(&SessionFile {
            token: Some(token.to_string()),
            saved_at: Some(Utc::now()),
        })
    }

    fn clear(&self) -> Result<(), SessionError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Process-local token, for embedding and tests
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token.lock().ok().and_then(|guard| guard.clone())
    }

    fn save_token(&self, token: &str) -> Result<(), SessionError> {
        if let Ok(mut guard) = self.token.lock() {
            *guard = Some(token.to_string());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        if let Ok(mut guard) = self.token.lock() {
            *guard = None;
        }
        Ok(())
    }
}

pub fn get_config_dir() -> Result<PathBuf, SessionError> {
    if let Some(dir) = crate::config::config().session.config_dir.clone() {
        return Ok(dir);
    }
    let home = std::env::var("HOME")
        .map_err(|_| SessionError::NoConfigDir("HOME environment variable not set".to_string()))?;
    Ok(PathBuf::from(home).join(".config").join("projcart"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested"));
        assert!(!store.is_logged_in());

        store.save_token("abc.def").unwrap();
        assert_eq!(store.token().as_deref(), Some("abc.def"));

        store.clear().unwrap();
        assert_eq!(store.token(), None);
        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_session_file_reads_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());
        fs::write(store.path(), "{not json").unwrap();
        assert_eq!(store.token(), None);
    }

    #[test]
    fn memory_store_holds_one_token() {
        let store = MemoryTokenStore::new();
        store.save_token("one").unwrap();
        store.save_token("two").unwrap();
        assert_eq!(store.token().as_deref(), Some("two"));
        store.clear().unwrap();
        assert!(!store.is_logged_in());
    }
}

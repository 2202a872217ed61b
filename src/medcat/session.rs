//! Session state and token persistence.
//!
//! The session is an explicit value passed by reference to whatever needs
//! it; the token lives behind the [`TokenStore`] port so the command layer
//! can be tested without touching the filesystem. An absent token means
//! "unauthenticated" and most catalog operations will be rejected by the
//! server.

use crate::error::{MedcatError, Result};
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

/// Filename of the persisted token, a single fixed key.
const TOKEN_FILENAME: &str = "token";

/// Connection parameters for one run: base URL plus the bearer-style
/// token carried in the `APIKEY` header.
#[derive(Debug, Clone)]
pub struct Session {
    pub api_url: String,
    pub token: Option<String>,
}

impl Session {
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            api_url: api_url.into(),
            token,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Abstract persistence for the session token.
pub trait TokenStore {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Production token store: one file in the platform config dir.
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILENAME)
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let path = self.token_path();
        if !path.exists() {
            return Ok(None);
        }
        let token = fs::read_to_string(path).map_err(MedcatError::Io)?;
        let token = token.trim().to_string();
        if token.is_empty() {
            return Ok(None);
        }
        Ok(Some(token))
    }

    fn save(&self, token: &str) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(MedcatError::Io)?;
        }
        fs::write(self.token_path(), token).map_err(MedcatError::Io)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let path = self.token_path();
        if path.exists() {
            fs::remove_file(path).map_err(MedcatError::Io)?;
        }
        Ok(())
    }
}

/// In-memory token store for tests.
pub struct InMemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self {
            token: RefCell::new(None),
        }
    }
}

impl Default for InMemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.token.borrow().clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.borrow_mut() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(temp_dir.path().to_path_buf());

        assert!(store.load().unwrap().is_none());

        store.save("abc123").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc123"));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn file_store_clear_is_idempotent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(temp_dir.path().to_path_buf());
        store.clear().unwrap();
        store.clear().unwrap();
    }

    #[test]
    fn blank_token_file_reads_as_unauthenticated() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(temp_dir.path().to_path_buf());
        store.save("  \n").unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn session_authentication_flag() {
        let anon = Session::new("http://localhost:3000", None);
        assert!(!anon.is_authenticated());

        let authed = Session::new("http://localhost:3000", Some("t".into()));
        assert!(authed.is_authenticated());
    }
}

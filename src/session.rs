//! Session credential storage
//!
//! The access layer depends on a [`TokenStore`] rather than a module-level
//! singleton, so commands and tests can inject their own implementation.
//! The token is written on successful signin, and removed on signin failure
//! or signout.

use anyhow::{Context, Result};
use parking_lot::RwLock;
use std::fs;
use std::path::PathBuf;

/// Storage for the single session token string.
pub trait TokenStore: Send + Sync {
    /// Current token, if a session exists.
    fn load(&self) -> Option<String>;

    /// Persist a new session token.
    fn save(&self, token: &str) -> Result<()>;

    /// Remove any stored token.
    fn clear(&self) -> Result<()>;
}

/// Token persisted as a plain file, surviving across CLI invocations.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let token = fs::read_to_string(&self.path).ok()?;
        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create token directory")?;
        }
        fs::write(&self.path, token).context("Failed to write token file")?;

        // Keep the session token readable by the owner only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            let _ = fs::set_permissions(&self.path, perms);
        }

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("Failed to remove token file"),
        }
    }
}

/// In-memory store for tests and one-shot library use.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.token.write() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.write() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load(), None);

        store.save("session-token").unwrap();
        assert_eq!(store.load().as_deref(), Some("session-token"));

        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn file_store_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "bounty-board-token-test-{}",
            std::process::id()
        ));
        let store = FileTokenStore::new(&path);
        let _ = store.clear();

        assert_eq!(store.load(), None);
        store.save("abc123").unwrap();
        assert_eq!(store.load().as_deref(), Some("abc123"));

        store.clear().unwrap();
        assert_eq!(store.load(), None);
        // Clearing a missing file is not an error
        store.clear().unwrap();
    }

    #[test]
    fn file_store_ignores_blank_token() {
        let path = std::env::temp_dir().join(format!(
            "bounty-board-blank-token-{}",
            std::process::id()
        ));
        let store = FileTokenStore::new(&path);
        store.save("  \n").unwrap();
        assert_eq!(store.load(), None);
        store.clear().unwrap();
    }
}

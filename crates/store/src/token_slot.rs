//! File-backed token slot.

use std::fs;
use std::path::PathBuf;

use eventcrm_auth::{TokenStore, TokenStoreError};

/// The single well-known token file. Its presence is the logged-in state;
/// absence means logged out.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        // Write-then-rename keeps replacement a single step, so a reader
        // never observes a half-written token.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, token).map_err(|e| TokenStoreError(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| TokenStoreError(e.to_string()))
    }

    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw.trim().to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TokenStoreError(e.to_string())),
        }
    }

    fn clear(&self) -> Result<bool, TokenStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(TokenStoreError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot() -> (tempfile::TempDir, FileTokenStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));
        (dir, store)
    }

    #[test]
    fn load_on_missing_file_is_none() {
        let (_dir, store) = slot();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_overwrites_and_load_round_trips() {
        let (_dir, store) = slot();
        store.save("token-one").unwrap();
        store.save("token-two").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("token-two"));
    }

    #[test]
    fn clear_reports_presence_and_is_idempotent() {
        let (_dir, store) = slot();
        assert!(!store.clear().unwrap());
        store.save("token").unwrap();
        assert!(store.clear().unwrap());
        assert!(!store.clear().unwrap());
        assert_eq!(store.load().unwrap(), None);
    }
}

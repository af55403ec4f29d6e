//! Token persistence seam.
//!
//! One token slot per installation: login overwrites it, logoff deletes it.
//! The file-backed implementation lives in the store crate; the in-memory
//! one here backs tests and any embedded use.

use std::sync::Mutex;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("token slot I/O failed: {0}")]
pub struct TokenStoreError(pub String);

/// The single well-known local token slot.
pub trait TokenStore {
    /// Persist a token, unconditionally overwriting any previous one.
    fn save(&self, token: &str) -> Result<(), TokenStoreError>;

    /// Read the persisted token. `None` means logged out.
    fn load(&self) -> Result<Option<String>, TokenStoreError>;

    /// Delete the persisted token. Returns whether one existed; clearing an
    /// empty slot is a no-op, not an error.
    fn clear(&self) -> Result<bool, TokenStoreError>;
}

/// In-memory slot.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for InMemoryTokenStore {
    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        *self.slot.lock().expect("token slot poisoned") = Some(token.to_string());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.slot.lock().expect("token slot poisoned").clone())
    }

    fn clear(&self) -> Result<bool, TokenStoreError> {
        Ok(self.slot.lock().expect("token slot poisoned").take().is_some())
    }
}

//! Store error model.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("data file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

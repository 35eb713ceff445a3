//! Key-value storage error types.

use thiserror::Error;

/// Errors that can occur when reading or writing persisted snapshots.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// The backing store reported an error.
    #[error("Store error: {0}")]
    BackendError(String),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

//! Error types for store operations.

use thiserror::Error;

/// Result type for store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

//! Error types for indexkv core.

use indexkv_codec::{CodecError, SortOrder};
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in collection operations.
///
/// Errors are returned as they happen. Nothing is retried and multi-key
/// writes are not rolled back, so a failed `save` or `delete` may leave some
/// index entries updated and others not.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Store adapter error.
    #[error("storage error: {0}")]
    Storage(#[from] indexkv_storage::StorageError),

    /// A field value could not be encoded into a key.
    #[error("encoding error: {0}")]
    Encoding(#[from] CodecError),

    /// A record could not be serialized or a stored value could not be decoded.
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of the failure.
        message: String,
    },

    /// The record has no usable identifier.
    #[error("record has no id")]
    MissingId,

    /// A unique index already holds the value for a different record.
    #[error("unique index {index} already holds this value for record {existing_id}")]
    UniqueConstraintViolation {
        /// Label of the violated index.
        index: String,
        /// Id of the record that owns the value.
        existing_id: String,
    },

    /// No registered index matches the query.
    #[error("no {order} index registered on field '{field}'")]
    NoMatchingIndex {
        /// Queried field.
        field: String,
        /// Queried order.
        order: SortOrder,
    },

    /// No record with this id exists.
    #[error("record not found: {id}")]
    NotFound {
        /// The id that was looked up.
        id: String,
    },

    /// The collection configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },
}

/// Broad classification of a [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`CoreError::MissingId`].
    MissingId,
    /// See [`CoreError::UniqueConstraintViolation`].
    UniqueConstraintViolation,
    /// See [`CoreError::NoMatchingIndex`].
    NoMatchingIndex,
    /// See [`CoreError::NotFound`].
    NotFound,
    /// Key encoding or record (de)serialization failed.
    Encoding,
    /// The store failed.
    Store,
    /// See [`CoreError::InvalidConfig`].
    Config,
}

impl CoreError {
    /// Creates a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Returns the kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Storage(_) => ErrorKind::Store,
            CoreError::Encoding(_) | CoreError::Serialization { .. } => ErrorKind::Encoding,
            CoreError::MissingId => ErrorKind::MissingId,
            CoreError::UniqueConstraintViolation { .. } => ErrorKind::UniqueConstraintViolation,
            CoreError::NoMatchingIndex { .. } => ErrorKind::NoMatchingIndex,
            CoreError::NotFound { .. } => ErrorKind::NotFound,
            CoreError::InvalidConfig { .. } => ErrorKind::Config,
        }
    }
}

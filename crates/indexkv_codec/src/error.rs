//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding field values or keys.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// NaN has no position in a total order.
    #[error("NaN cannot be encoded into an ordered key")]
    NotANumber,

    /// A string contains a character reserved by the encoding.
    #[error("string contains reserved character U+{code_point:04X}")]
    ReservedCharacter {
        /// The offending code point.
        code_point: u32,
    },

    /// A physical key could not be split into its components.
    #[error("malformed key: {message}")]
    MalformedKey {
        /// Description of the problem.
        message: String,
    },
}

impl CodecError {
    /// Create a malformed key error.
    pub fn malformed_key(message: impl Into<String>) -> Self {
        Self::MalformedKey {
            message: message.into(),
        }
    }
}

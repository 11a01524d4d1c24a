//! Error handling for the hashing crate

use thiserror::Error;

/// Hashing-specific errors
///
/// The algorithm itself cannot fail; every variant is either a misuse of the
/// hasher lifecycle, an invalid caller-supplied value, or an I/O problem in one
/// of the adapters.
#[derive(Debug, Error)]
pub enum HashError {
    /// `update` or `finish` was called on a hasher that already produced its digest
    #[error("Hasher already finalized; reset it before hashing another message")]
    Finalized,

    /// Total input would exceed 2^64 - 1 bits
    #[error("Input length overflow: {requested} more bytes after {total} exceeds the SHA-256 limit")]
    LengthOverflow {
        /// Bytes fed before the rejected call
        total: u64,
        /// Bytes in the rejected call
        requested: u64,
    },

    /// A digest could not be parsed from its textual or byte form
    #[error("Invalid digest: {0}")]
    InvalidDigest(String),

    /// Reading from a stream or reader failed
    #[error("Stream processing error: {0}")]
    StreamProcessing(String),

    /// Invalid configuration or builder parameters
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Internal failure, e.g. a background hashing task was dropped
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HashError {
    /// Create an internal error
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create an `invalid_parameters` error
    #[must_use]
    pub fn invalid_parameters(msg: impl Into<String>) -> Self {
        Self::InvalidParameters(msg.into())
    }

    /// Whether the error is a lifecycle or length-limit contract violation
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::Finalized | Self::LengthOverflow { .. })
    }
}

impl From<std::io::Error> for HashError {
    fn from(err: std::io::Error) -> Self {
        Self::StreamProcessing(err.to_string())
    }
}

impl From<HashError> for std::io::Error {
    fn from(err: HashError) -> Self {
        if err.is_contract_violation() {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
        } else {
            std::io::Error::other(err)
        }
    }
}

/// Result type for hashing operations
pub type Result<T> = std::result::Result<T, HashError>;

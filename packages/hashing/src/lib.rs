//! Streaming SHA-256 message digests
//!
//! The core is [`Sha256`], an incremental hasher with a three-phase contract:
//! create (or [`Sha256::reset`]), feed bytes with [`Sha256::update`] in any
//! chunking, then [`Sha256::finish`] / [`Sha256::finalize`] to get the 32-byte
//! digest. Around it sit `std::io`/`tokio::io` adapters, a `futures::Stream`
//! adapter and the fluent async builder API.

#![forbid(unsafe_code)]

pub mod api;
pub mod async_result;
pub mod config;
pub mod digest;
pub mod error;
pub mod io;
pub mod sha256;
pub mod streaming;

// Re-export error types
pub use error::{HashError, Result};

// Re-export the core hasher and its output
pub use digest::Sha256Digest;
pub use sha256::{Phase, Sha256, BLOCK_LEN, DIGEST_LEN, MAX_INPUT_BYTES};

pub use api::{Hash, Sha256Builder};
pub use async_result::{AsyncHashResult, AsyncHashResultWithError, AsyncHashResultWithHandler};
pub use config::ComputeConfig;
pub use io::{hash_async_reader, hash_reader};
pub use streaming::{collect_hash, stream_sha256, StreamHashChunk, StreamHashResult, StreamingHasher};

// Re-export common handlers from hashkit_common
pub use hashkit_common::{on_error, on_result};

/// Hash `data` in one call
///
/// # Errors
///
/// Returns `HashError::LengthOverflow` if `data` exceeds [`MAX_INPUT_BYTES`].
pub fn sha256(data: &[u8]) -> Result<Sha256Digest> {
    Sha256::digest(data)
}

/// Main entry point; equivalent to [`Hash`]
pub struct Hashkit;

impl Hashkit {
    /// Master builder for hash operations
    #[must_use]
    pub fn hash() -> HashMasterBuilder {
        HashMasterBuilder
    }
}

/// Master builder for hash operations
pub struct HashMasterBuilder;

impl HashMasterBuilder {
    /// Use SHA-256 hashing
    #[must_use]
    pub fn sha256(self) -> Sha256Builder {
        Sha256Builder::new()
    }
}

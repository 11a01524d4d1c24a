//! Tunables for the async hashing API

use crate::{HashError, Result};
use serde::{Deserialize, Serialize};

/// Default number of bytes fed to the hasher between cooperative yields
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Largest accepted `chunk_size`
pub const MAX_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// How the async builders split in-memory input
///
/// Only scheduling is affected; the digest never depends on these values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputeConfig {
    /// Bytes per `update` call
    pub chunk_size: usize,
    /// Yield to the tokio scheduler after each chunk
    pub yield_between_chunks: bool,
}

impl Default for ComputeConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            yield_between_chunks: true,
        }
    }
}

impl ComputeConfig {
    /// Set the chunk size
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Enable or disable yielding between chunks
    #[must_use]
    pub fn with_yield(mut self, yield_between_chunks: bool) -> Self {
        self.yield_between_chunks = yield_between_chunks;
        self
    }

    /// Check that the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns `HashError::InvalidParameters` if `chunk_size` is zero or above
    /// [`MAX_CHUNK_SIZE`].
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(HashError::invalid_parameters(format!(
                "chunk_size must be between 1 and {MAX_CHUNK_SIZE}, got {}",
                self.chunk_size
            )));
        }
        Ok(())
    }
}

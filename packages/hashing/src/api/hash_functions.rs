//! Internal async drivers shared by the builders

use crate::config::ComputeConfig;
use crate::digest::Sha256Digest;
use crate::sha256::Sha256;
use crate::Result;
use hashkit_common::LoggingTransformer;
use std::time::Instant;
use tokio_stream::{Stream, StreamExt};

/// Hash in-memory data in `config.chunk_size` slices, yielding between them
///
/// # Errors
///
/// Returns `HashError::InvalidParameters` for an invalid config and
/// `HashError::LengthOverflow` for inputs past the SHA-256 limit.
pub async fn sha256_hash(data: &[u8], config: &ComputeConfig) -> Result<Sha256Digest> {
    config.validate()?;

    let started = Instant::now();
    let mut hasher = Sha256::new();

    for chunk in data.chunks(config.chunk_size) {
        hasher.update(chunk)?;
        if config.yield_between_chunks {
            tokio::task::yield_now().await;
        }
    }

    let total_bytes = hasher.total_len();
    let digest = hasher.finalize()?;
    LoggingTransformer::log_digest_computed("sha256", &digest.to_hex(), total_bytes);
    LoggingTransformer::log_throughput("sha256", total_bytes, started.elapsed());
    Ok(digest)
}

/// Hash a stream of chunks, passing each through `chunk_handler` first
///
/// A handler returning `None` ends the input early; the digest covers every
/// chunk accepted before that point.
///
/// # Errors
///
/// Returns `HashError::LengthOverflow` for inputs past the SHA-256 limit.
pub async fn sha256_stream<S, C>(stream: S, chunk_handler: C) -> Result<Sha256Digest>
where
    S: Stream<Item = Vec<u8>> + Send,
    C: Fn(Result<Vec<u8>>) -> Option<Vec<u8>>,
{
    let mut hasher = Sha256::new();
    let mut stream = Box::pin(stream);

    while let Some(chunk) = stream.next().await {
        match chunk_handler(Ok(chunk)) {
            Some(data) => hasher.update(&data)?,
            None => {
                tracing::warn!(
                    total = hasher.total_len(),
                    "Chunk handler stopped SHA-256 stream early; digest covers accepted chunks only"
                );
                break;
            }
        }
    }

    let total_bytes = hasher.total_len();
    let digest = hasher.finalize()?;
    LoggingTransformer::log_digest_computed("sha256_stream", &digest.to_hex(), total_bytes);
    Ok(digest)
}

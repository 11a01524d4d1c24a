//! True streaming hash computation over `futures::Stream`
//!
//! Each input chunk is fed to [`Sha256`] as it arrives; nothing but the
//! hasher's fixed-size state is retained between chunks.

use crate::digest::Sha256Digest;
use crate::sha256::Sha256;
use crate::{HashError, Result};
use futures::Stream;
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

pin_project! {
    /// Stream adapter that hashes chunks incrementally
    ///
    /// Yields one [`StreamHashChunk`] per input chunk and a final chunk
    /// carrying the digest once the input ends.
    pub struct StreamingHasher<S> {
        #[pin]
        input: S,
        hasher: Sha256,
        finished: bool,
    }
}

impl<S> StreamingHasher<S>
where
    S: Stream<Item = Vec<u8>>,
{
    /// Create a new streaming hasher over `input`
    pub fn new(input: S) -> Self {
        Self {
            input,
            hasher: Sha256::new(),
            finished: false,
        }
    }

    /// Get the total number of bytes processed so far
    pub fn total_bytes(&self) -> u64 {
        self.hasher.total_len()
    }
}

/// Result of streaming hash computation
#[derive(Debug, Clone)]
pub struct StreamHashResult {
    /// The final digest
    pub digest: Sha256Digest,
    /// Total bytes processed
    pub total_bytes: u64,
}

/// Progress record emitted by [`StreamingHasher`]
#[derive(Debug, Clone)]
pub struct StreamHashChunk {
    /// Bytes processed in this chunk
    pub bytes_processed: u64,
    /// Total bytes processed so far
    pub total_bytes: u64,
    /// Whether this is the final chunk with the digest
    pub is_final: bool,
    /// Final digest (only present if `is_final` = true)
    pub digest: Option<Sha256Digest>,
}

impl<S> Stream for StreamingHasher<S>
where
    S: Stream<Item = Vec<u8>>,
{
    type Item = Result<StreamHashChunk>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        match this.input.poll_next(cx) {
            Poll::Ready(Some(chunk)) => {
                // The error is the last item; the stream is fused afterwards
                if let Err(e) = this.hasher.update(&chunk) {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(e)));
                }

                Poll::Ready(Some(Ok(StreamHashChunk {
                    bytes_processed: chunk.len() as u64,
                    total_bytes: this.hasher.total_len(),
                    is_final: false,
                    digest: None,
                })))
            }
            Poll::Ready(None) => {
                *this.finished = true;
                let total_bytes = this.hasher.total_len();

                let result = this.hasher.finalize_reset().map(|digest| StreamHashChunk {
                    bytes_processed: 0,
                    total_bytes,
                    is_final: true,
                    digest: Some(digest),
                });
                Poll::Ready(Some(result))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Create a streaming SHA-256 hasher from any stream of byte chunks
pub fn stream_sha256<S>(input: S) -> StreamingHasher<S>
where
    S: Stream<Item = Vec<u8>>,
{
    StreamingHasher::new(input)
}

/// Drive a streaming hasher to completion and return the digest
///
/// # Errors
///
/// Returns `HashError` if the input exceeds the SHA-256 length limit or the
/// stream ends without producing a digest.
pub async fn collect_hash<S>(mut hasher: StreamingHasher<S>) -> Result<StreamHashResult>
where
    S: Stream<Item = Vec<u8>> + Unpin,
{
    use futures::StreamExt;

    while let Some(chunk_result) = hasher.next().await {
        let chunk = chunk_result?;

        if chunk.is_final {
            if let Some(digest) = chunk.digest {
                hashkit_common::LoggingTransformer::log_digest_computed(
                    "stream_sha256",
                    &digest.to_hex(),
                    chunk.total_bytes,
                );
                return Ok(StreamHashResult {
                    digest,
                    total_bytes: chunk.total_bytes,
                });
            }
        }
    }

    Err(HashError::StreamProcessing(
        "Stream ended without producing final digest".to_string(),
    ))
}

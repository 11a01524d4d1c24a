//! SHA-256 hash builder

use super::hash_functions::{sha256_hash, sha256_stream};
use crate::config::ComputeConfig;
use crate::digest::Sha256Digest;
use crate::{AsyncHashResult, AsyncHashResultWithError, HashError, Result};
use tokio::sync::oneshot;
use tokio_stream::Stream;

/// SHA-256 hash builder
#[derive(Debug, Clone, Default)]
pub struct Sha256Builder {
    config: ComputeConfig,
}

/// SHA-256 hash builder with result handler
pub struct Sha256BuilderWithHandler<F, T> {
    config: ComputeConfig,
    result_handler: F,
    _phantom: std::marker::PhantomData<T>,
}

/// SHA-256 hash builder with error handler
pub struct Sha256BuilderWithError<E> {
    config: ComputeConfig,
    error_handler: E,
}

/// SHA-256 hash builder with chunk handler
pub struct Sha256BuilderWithChunk<C> {
    chunk_handler: C,
}

fn spawn_hash(data: Vec<u8>, config: ComputeConfig) -> oneshot::Receiver<Result<Sha256Digest>> {
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let result = sha256_hash(&data, &config).await;
        let _ = tx.send(result);
    });

    rx
}

impl Sha256Builder {
    /// Create new SHA-256 builder with the default [`ComputeConfig`]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole compute configuration
    #[must_use]
    pub fn with_config(mut self, config: ComputeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set how many bytes are hashed between cooperative yields
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = chunk_size;
        self
    }

    /// The configuration this builder will compute with
    #[must_use]
    pub fn config(&self) -> &ComputeConfig {
        &self.config
    }

    /// Add `on_result` handler
    #[must_use]
    pub fn on_result<F, T>(self, handler: F) -> Sha256BuilderWithHandler<F, T>
    where
        F: FnOnce(Result<Sha256Digest>) -> T + Send + 'static,
        T: Send + 'static,
    {
        Sha256BuilderWithHandler {
            config: self.config,
            result_handler: handler,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Add `on_error` handler - transforms errors but passes through success
    #[must_use]
    pub fn on_error<E>(self, handler: E) -> Sha256BuilderWithError<E>
    where
        E: Fn(HashError) -> HashError + Send + Sync + 'static,
    {
        Sha256BuilderWithError {
            config: self.config,
            error_handler: handler,
        }
    }

    /// Add `on_chunk` handler for streaming input
    #[must_use]
    pub fn on_chunk<C>(self, handler: C) -> Sha256BuilderWithChunk<C>
    where
        C: Fn(Result<Vec<u8>>) -> Option<Vec<u8>> + Send + Sync + 'static,
    {
        Sha256BuilderWithChunk {
            chunk_handler: handler,
        }
    }

    /// Compute the digest on a background task
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn compute<T: Into<Vec<u8>>>(self, data: T) -> AsyncHashResult {
        if let Err(e) = self.config.validate() {
            return AsyncHashResult::error(e);
        }
        AsyncHashResult::new(spawn_hash(data.into(), self.config))
    }

    /// Hash every chunk of `stream` and return the digest
    ///
    /// # Errors
    ///
    /// Returns `HashError::LengthOverflow` for inputs past the SHA-256 limit.
    pub async fn compute_stream<S>(self, stream: S) -> Result<Sha256Digest>
    where
        S: Stream<Item = Vec<u8>> + Send + 'static,
    {
        sha256_stream(stream, |chunk: Result<Vec<u8>>| hashkit_common::on_chunk(chunk).ok()).await
    }
}

impl<F, T> Sha256BuilderWithHandler<F, T>
where
    F: FnOnce(Result<Sha256Digest>) -> T + Send + 'static,
    T: Send + 'static,
{
    /// Compute the digest and hand the result to the handler
    pub async fn compute<D: Into<Vec<u8>>>(self, data: D) -> T {
        let data = data.into();
        let handler = self.result_handler;

        let result = sha256_hash(&data, &self.config).await;

        handler(result)
    }
}

impl<E> Sha256BuilderWithError<E>
where
    E: Fn(HashError) -> HashError + Send + Sync + Unpin + 'static,
{
    /// Add `on_result` handler after error handler
    ///
    /// The error handler is applied before the result reaches `handler`.
    #[must_use]
    pub fn on_result<F, T>(
        self,
        handler: F,
    ) -> Sha256BuilderWithHandler<impl FnOnce(Result<Sha256Digest>) -> T + Send + 'static, T>
    where
        F: FnOnce(Result<Sha256Digest>) -> T + Send + 'static,
        T: Send + 'static,
    {
        let error_handler = self.error_handler;
        Sha256BuilderWithHandler {
            config: self.config,
            result_handler: move |result: Result<Sha256Digest>| handler(result.map_err(error_handler)),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Compute hash with error handler
    #[must_use]
    pub fn compute<T: Into<Vec<u8>>>(self, data: T) -> AsyncHashResultWithError<E> {
        let error_handler = self.error_handler;

        if let Err(e) = self.config.validate() {
            let (tx, rx) = oneshot::channel();
            let _ = tx.send(Err(e));
            return AsyncHashResultWithError::new(rx, error_handler);
        }

        AsyncHashResultWithError::new(spawn_hash(data.into(), self.config), error_handler)
    }
}

impl<C> Sha256BuilderWithChunk<C>
where
    C: Fn(Result<Vec<u8>>) -> Option<Vec<u8>> + Send + Sync + 'static,
{
    /// Hash `stream` through the chunk handler; `None` from the handler ends input
    ///
    /// # Errors
    ///
    /// Returns `HashError::LengthOverflow` for inputs past the SHA-256 limit.
    pub async fn compute_stream<S>(self, stream: S) -> Result<Sha256Digest>
    where
        S: Stream<Item = Vec<u8>> + Send + 'static,
    {
        sha256_stream(stream, self.chunk_handler).await
    }
}

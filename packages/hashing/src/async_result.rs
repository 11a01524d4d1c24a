//! Async digest result types implementing the unwrapping pattern

use crate::digest::Sha256Digest;
use crate::{HashError, Result};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Future resolving to the digest computed by a background task
pub struct AsyncHashResult {
    receiver: oneshot::Receiver<Result<Sha256Digest>>,
}

/// Async digest result with a user-defined result handler
///
/// The handler runs once. Polling again after the future has returned
/// `Ready` yields `Pending` and never wakes.
pub struct AsyncHashResultWithHandler<F> {
    receiver: oneshot::Receiver<Result<Sha256Digest>>,
    handler: Option<F>,
}

/// Async digest result with error transformation
pub struct AsyncHashResultWithError<E> {
    receiver: oneshot::Receiver<Result<Sha256Digest>>,
    error_handler: E,
}

fn task_dropped() -> HashError {
    HashError::internal("Hash computation task dropped")
}

impl AsyncHashResult {
    /// Create a new `AsyncHashResult` from a oneshot receiver
    pub(crate) fn new(receiver: oneshot::Receiver<Result<Sha256Digest>>) -> Self {
        Self { receiver }
    }

    /// Create an `AsyncHashResult` that's already completed
    #[must_use]
    pub fn ready(result: Result<Sha256Digest>) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(result);
        Self { receiver: rx }
    }

    /// Create an `AsyncHashResult` that yields an error
    #[must_use]
    pub fn error(error: HashError) -> Self {
        Self::ready(Err(error))
    }

    /// Attach a handler that turns the result into a plain value
    pub fn on_result<F, T>(self, handler: F) -> AsyncHashResultWithHandler<F>
    where
        F: FnOnce(Result<Sha256Digest>) -> T,
    {
        AsyncHashResultWithHandler {
            receiver: self.receiver,
            handler: Some(handler),
        }
    }
}

impl Future for AsyncHashResult {
    type Output = Result<Sha256Digest>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(task_dropped())),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<F, T> Future for AsyncHashResultWithHandler<F>
where
    F: FnOnce(Result<Sha256Digest>) -> T + Unpin,
{
    type Output = T;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        // Handler already consumed: completed, never ready again
        if this.handler.is_none() {
            return Poll::Pending;
        }

        let result = match Pin::new(&mut this.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => result,
            Poll::Ready(Err(_)) => Err(task_dropped()),
            Poll::Pending => return Poll::Pending,
        };

        match this.handler.take() {
            Some(handler) => Poll::Ready(handler(result)),
            None => Poll::Pending,
        }
    }
}

impl<E> AsyncHashResultWithError<E> {
    /// Create a new `AsyncHashResultWithError`
    pub(crate) fn new(receiver: oneshot::Receiver<Result<Sha256Digest>>, error_handler: E) -> Self {
        Self {
            receiver,
            error_handler,
        }
    }
}

impl<E> Future for AsyncHashResultWithError<E>
where
    E: Fn(HashError) -> HashError + Unpin,
{
    type Output = Result<Sha256Digest>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match Pin::new(&mut this.receiver).poll(cx) {
            Poll::Ready(Ok(Ok(value))) => Poll::Ready(Ok(value)),
            Poll::Ready(Ok(Err(e))) => Poll::Ready(Err((this.error_handler)(e))),
            Poll::Ready(Err(_)) => Poll::Ready(Err((this.error_handler)(task_dropped()))),
            Poll::Pending => Poll::Pending,
        }
    }
}

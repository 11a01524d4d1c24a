//! Common handler functions for result and chunk processing
//!
//! These provide the `on_result`, `on_chunk` and `on_error` symbols the hashing
//! builders accept when a caller has no custom handling of its own.

/// Default result handler that logs completion and passes the result through
pub fn on_result<T>(result: T) -> T {
    tracing::debug!("Digest operation completed");
    result
}

/// Default chunk handler that logs chunk flow and passes the chunk through
pub fn on_chunk<T>(chunk: T) -> T {
    tracing::trace!("Processing input chunk");
    chunk
}

/// Default error handler that logs errors before passing them through
pub fn on_error<T: std::fmt::Debug>(error: T) -> T {
    tracing::warn!("Digest operation failed: {error:?}");
    error
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handlers_are_identity() {
        assert_eq!(on_result(Ok::<u8, ()>(7)), Ok(7));
        assert_eq!(on_chunk(vec![1u8, 2, 3]), vec![1, 2, 3]);
        assert_eq!(on_error("boom"), "boom");
    }
}

//! Structured logging infrastructure
//!
//! `env_logger` backs the `log` facade; the hashing crates emit `tracing` events,
//! which are forwarded to `log` when no `tracing` subscriber is installed.

use log::{debug, info, warn};
use std::sync::Once;
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Number of hex characters of a digest that may appear in logs
const DIGEST_PREFIX_LEN: usize = 12;

/// Logging entry points used across the workspace
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging (call once at application startup)
    ///
    /// Configure levels via `RUST_LOG`:
    /// - `RUST_LOG=debug` - digests produced by the async and stream layers
    /// - `RUST_LOG=hashkit_hashing=trace` - per-update byte counts
    /// - `RUST_LOG=warn` - contract violations only
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; later calls are ignored.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log a produced digest without revealing more than a short prefix of it
    pub fn log_digest_computed(operation: &str, digest_hex: &str, total_bytes: u64) {
        debug!(
            "Digest computed: {operation} (bytes: {total_bytes}, digest: {})",
            Self::digest_prefix(digest_hex)
        );
    }

    /// Log a misuse of the hasher lifecycle or length limits
    pub fn log_contract_violation<E: std::error::Error>(operation: &str, error: &E) {
        warn!(
            "Hasher contract violated: {operation} ({error}, error_type: {})",
            std::any::type_name_of_val(error)
        );
    }

    /// Log throughput for a finished hashing run
    pub fn log_throughput(operation: &str, total_bytes: u64, elapsed: Duration) {
        let secs = elapsed.as_secs_f64();
        if secs > 0.0 {
            #[allow(clippy::cast_precision_loss)]
            let mib_per_sec = total_bytes as f64 / (1024.0 * 1024.0) / secs;
            debug!("Performance: {operation} hashed {total_bytes} bytes at {mib_per_sec:.1} MiB/s");
        } else {
            debug!("Performance: {operation} hashed {total_bytes} bytes");
        }
    }

    fn digest_prefix(digest_hex: &str) -> &str {
        digest_hex
            .get(..DIGEST_PREFIX_LEN)
            .unwrap_or(digest_hex)
    }
}

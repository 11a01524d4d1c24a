//! Common infrastructure shared by the hashkit crates
//!
//! This crate provides:
//! - `env_logger` initialization for binaries, benches and tests
//! - Structured log helpers that never print hashed input
//! - Default `on_result` / `on_chunk` / `on_error` pass-through handlers

pub mod handlers;
pub mod logging;

pub use handlers::{on_chunk, on_error, on_result};
pub use logging::LoggingTransformer;

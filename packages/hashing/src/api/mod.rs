//! Fluent hashing API
//!
//! Actions take data as arguments:
//! `Hash::sha256().with_chunk_size(4096).compute(data).await`

pub mod hash_entry;
pub mod hash_functions;
pub mod sha256_builder;

// Re-export main entry point
pub use hash_entry::Hash;

pub use sha256_builder::{
    Sha256Builder, Sha256BuilderWithChunk, Sha256BuilderWithError, Sha256BuilderWithHandler,
};

//! # Bloomer
//!
//! A Bloom filter sized from an expected element count and a target false
//! positive rate. Probe locations come from four seeded FNV-1a hashes
//! combined by double hashing, and the filter state can be exported in a
//! portable base64 format for exchange with other implementations.

pub mod bloom;
pub mod codec;
pub mod hash;
pub mod utils;

pub use bloom::{BloomFilter, BloomStats, FilterConfig, Input};
pub use codec::FilterJson;
pub use hash::{base_hashes, fnv64_hash, BaseHashes};
pub use utils::{check_parameters, estimate_parameters, BloomParameters};

// Python bindings
#[cfg(feature = "python")]
pub mod python_module;

/// Common error types for the library
#[derive(Debug, thiserror::Error)]
pub enum BloomerError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BloomerError>;

//! # SHA Bloom
//!
//! A Bloom filter over byte strings. Bit positions come from SHA-256 of the
//! element followed by a one-byte hash index, so a filter's contents are
//! reproducible bit for bit by any implementation of the same scheme.
//!
//! ```
//! use sha_bloom::Filter;
//!
//! let mut bloom = Filter::new(100, 0.01)?;
//! bloom.add(b"bob@example.com")?;
//!
//! assert!(bloom.has(b"bob@example.com")?);
//! # Ok::<(), sha_bloom::BloomError>(())
//! ```

pub mod bloom;
pub mod config;
pub mod hash;
pub mod utils;

pub use bloom::{bit_location, Filter, FilterStats};
pub use config::FilterConfig;
pub use hash::{bit_positions, BitPositions};

// Python bindings
#[cfg(feature = "python")]
pub mod python_module;

use thiserror::Error;

/// Common error types for the library
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BloomError {
    #[error("number of elements must be positive")]
    ZeroCapacity,

    #[error("probability must be positive: {prob}")]
    InvalidProbability { prob: f64 },

    #[error("hash function failed: {0}")]
    HashFailure(#[from] std::num::ParseIntError),

    #[error("bit array of {bit_len} bits does not fit in memory")]
    BitLengthOverflow { bit_len: u64 },

    #[error("bit store has {actual} words, expected {expected}")]
    BitStoreLength { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, BloomError>;

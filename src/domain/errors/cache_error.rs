//! Local store error types.

use thiserror::Error;

/// Errors from the local image store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum CacheError {
    /// The URL has no usable file name component.
    #[error("no cache file name can be derived from {0:?}")]
    InvalidKey(String),

    #[error("io error: {0}")]
    Io(String),
}

/// Result type for local store operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

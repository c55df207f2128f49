//! Load workflow error types.

use thiserror::Error;

use super::{CacheError, FetchError};
use crate::domain::entities::ImageSource;
use crate::domain::ports::PresentError;

/// Every way a load can end without an image on screen.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum LoadError {
    /// The unit already has a load in flight.
    #[error("unit is already loading")]
    AlreadyLoading,

    /// No cached copy and the network is not reachable.
    #[error("no internet connection")]
    Unreachable,

    /// The read or download returned zero bytes.
    #[error("empty payload from {origin}")]
    EmptyPayload { origin: ImageSource },

    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("present failed: {0}")]
    Present(#[from] PresentError),
}

/// Result type for loads.
pub type LoadResult<T> = std::result::Result<T, LoadError>;

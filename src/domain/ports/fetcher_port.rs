//! Port definition for retrieving image bytes.

use async_trait::async_trait;

use crate::domain::entities::Fetched;
use crate::domain::errors::FetchError;

/// Outcome of a single retrieval.
pub type FetchResult = std::result::Result<Fetched, FetchError>;

/// Port for remote retrieval.
/// Implementations must be thread-safe.
#[async_trait]
pub trait FetcherPort: Send + Sync {
    /// Issues one GET for `url` and waits for the full body.
    ///
    /// An empty body is a successful fetch with zero bytes; callers decide
    /// whether that is usable.
    async fn fetch_remote(&self, url: &str) -> FetchResult;
}

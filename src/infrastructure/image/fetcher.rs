//! Byte retrieval from local files and remote URLs.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tokio::fs;
use tracing::{debug, trace};

use crate::domain::entities::Fetched;
use crate::domain::errors::FetchError;
use crate::domain::ports::{FetchResult, FetcherPort};

/// Configuration for the HTTP fetcher.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Request timeout in seconds. Zero leaves the transport default (none).
    pub timeout_secs: u64,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("imgdisp/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Turns a local path into a `file://` resource URL for this platform.
///
/// Relative paths are resolved against the working directory. Drive letters
/// and separators are handled by [`Url::from_file_path`].
///
/// # Errors
/// Returns error if the path cannot be made absolute or expressed as a URL.
pub fn resolve_local_resource(path: &Path) -> Result<Url, FetchError> {
    let absolute = std::path::absolute(path)
        .map_err(|e| FetchError::Io(format!("Failed to resolve {}: {e}", path.display())))?;
    Url::from_file_path(&absolute).map_err(|()| {
        FetchError::invalid_url(absolute.display().to_string(), "not a valid file path")
    })
}

/// Reads the bytes behind a local path through its resource URL.
///
/// # Errors
/// Returns error if the path cannot be resolved or read.
pub async fn fetch_local(path: &Path) -> FetchResult {
    let url = resolve_local_resource(path)?;
    let file_path = url
        .to_file_path()
        .map_err(|()| FetchError::invalid_url(url.as_str(), "not a file url"))?;

    trace!(url = %url, "Reading local resource");
    let bytes = fs::read(&file_path)
        .await
        .map_err(|e| FetchError::Io(format!("Failed to read {url}: {e}")))?;
    Ok(Fetched::new(bytes))
}

/// Remote fetcher backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher with the given configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::transport(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FetcherPort for HttpFetcher {
    async fn fetch_remote(&self, url: &str) -> FetchResult {
        let parsed = Url::parse(url).map_err(|e| FetchError::invalid_url(url, e.to_string()))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| FetchError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::transport(format!("Failed to read body: {e}")))?;

        debug!(url = %url, size = bytes.len(), "Fetched remote resource");
        Ok(Fetched::new(bytes))
    }
}

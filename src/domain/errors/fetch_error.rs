//! Fetch error types.

use thiserror::Error;

/// Why a fetch produced no payload.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum FetchError {
    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP {code}: {reason}")]
    Status { code: u16, reason: String },

    #[error("io error: {0}")]
    Io(String),
}

impl FetchError {
    /// Creates invalid url error.
    #[must_use]
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}

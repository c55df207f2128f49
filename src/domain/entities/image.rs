//! Domain types for image loading.

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;

use super::display_unit::DisplayUnit;

/// Where a successfully loaded image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Read from the local persistent store.
    DiskCache,
    /// Downloaded from the network.
    Network,
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DiskCache => write!(f, "disk"),
            Self::Network => write!(f, "network"),
        }
    }
}

/// Raw bytes produced by a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    /// The payload exactly as retrieved.
    pub bytes: Bytes,
}

impl Fetched {
    /// Wraps a payload.
    #[must_use]
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Number of bytes retrieved.
    #[must_use]
    pub fn byte_count(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Returns true if nothing was retrieved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// An accepted load, created once the unit's guard is taken.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    /// URL after default-URL fallback. May be empty.
    pub url: String,
    /// Derived local cache path for `url`.
    pub target_path: PathBuf,
    /// The unit receiving the image.
    pub unit: Arc<DisplayUnit>,
}

/// Returns the trailing path segment of a URL or path.
///
/// Everything after the last `/` or `\`. Query strings and fragments are
/// kept, so `http://x/a.png?v=2` yields `a.png?v=2`.
#[must_use]
pub fn file_name_of(url: &str) -> &str {
    url.rsplit(['/', '\\']).next().unwrap_or_default()
}

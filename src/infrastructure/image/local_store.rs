//! Flat on-disk store of downloaded image bytes.
//!
//! One file per URL, named after the URL's trailing path segment, directly
//! under a single persistent-data directory. Entries are never expired.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, trace, warn};

use super::fetcher::fetch_local;
use crate::domain::entities::file_name_of;
use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::ports::FetchResult;

/// How cache file names are derived from URLs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CacheKeyMode {
    /// The URL's trailing path segment. URLs sharing a basename share a file.
    #[default]
    Filename,
    /// Hash of the full URL plus the original extension.
    Hashed,
}

impl std::fmt::Display for CacheKeyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Filename => write!(f, "filename"),
            Self::Hashed => write!(f, "hashed"),
        }
    }
}

/// Disk store that persists raw image bytes keyed by derived path.
#[derive(Debug)]
pub struct LocalStore {
    root: PathBuf,
    key_mode: CacheKeyMode,
}

impl LocalStore {
    /// Creates a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub async fn new(root: PathBuf) -> CacheResult<Self> {
        fs::create_dir_all(&root)
            .await
            .map_err(|e| CacheError::Io(format!("Failed to create data dir: {e}")))?;
        Ok(Self {
            root,
            key_mode: CacheKeyMode::default(),
        })
    }

    /// Creates a store in the platform data directory.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub async fn default_location() -> CacheResult<Self> {
        Self::new(default_data_dir()).await
    }

    /// Sets how file names are derived.
    #[must_use]
    pub const fn with_key_mode(mut self, key_mode: CacheKeyMode) -> Self {
        self.key_mode = key_mode;
        self
    }

    /// The persistent-data directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// How file names are derived.
    #[must_use]
    pub const fn key_mode(&self) -> CacheKeyMode {
        self.key_mode
    }

    /// Maps a URL to its cache file path.
    ///
    /// With [`CacheKeyMode::Filename`] a URL without a trailing segment maps
    /// to the root itself, which never exists as a file and cannot be written.
    #[must_use]
    pub fn derive_path(&self, url: &str) -> PathBuf {
        match self.key_mode {
            CacheKeyMode::Filename => self.root.join(file_name_of(url)),
            CacheKeyMode::Hashed => self.root.join(hashed_file_name(url)),
        }
    }

    /// Returns true if a regular file exists at `path`.
    pub async fn exists(&self, path: &Path) -> bool {
        let found = fs::metadata(path).await.is_ok_and(|meta| meta.is_file());
        trace!(path = %path.display(), found, "Local store lookup");
        found
    }

    /// Reads the bytes stored at `path`.
    ///
    /// # Errors
    /// Returns error if the file cannot be resolved or read.
    pub async fn read(&self, path: &Path) -> FetchResult {
        fetch_local(path).await
    }

    /// Creates or overwrites the file at `path`.
    ///
    /// The bytes land in a temp file next to the target and are renamed into
    /// place, so concurrent readers see either the old or the new file.
    ///
    /// # Errors
    /// Returns error if `path` is not a file inside the store or the write fails.
    pub async fn write(&self, path: &Path, bytes: &[u8]) -> CacheResult<()> {
        if path == self.root || path.file_name().is_none() {
            return Err(CacheError::InvalidKey(path.display().to_string()));
        }
        let parent = path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| CacheError::InvalidKey(path.display().to_string()))?;

        let target = path.to_path_buf();
        let data = bytes.to_vec();
        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let mut temp_file = tempfile::NamedTempFile::new_in(&parent)?;
            temp_file.write_all(&data)?;
            temp_file.as_file().sync_all()?;
            temp_file.persist(&target).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| CacheError::Io(format!("Write task panicked: {e}")))?
        .map_err(|e| CacheError::Io(format!("Failed to write cache file: {e}")))?;

        debug!(path = %path.display(), size = bytes.len(), "Stored image in local store");
        Ok(())
    }

    /// Returns the number of cached files.
    pub async fn len(&self) -> usize {
        let Ok(mut entries) = fs::read_dir(&self.root).await else {
            warn!(root = %self.root.display(), "Failed to read data dir");
            return 0;
        };

        let mut count = 0;
        while let Ok(Some(entry)) = entries.next_entry().await {
            let is_temp = entry.file_name().to_string_lossy().starts_with(".tmp");
            if !is_temp && entry.metadata().await.is_ok_and(|meta| meta.is_file()) {
                count += 1;
            }
        }
        count
    }

    /// Returns true if nothing is cached.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// First 16 bytes of the URL's SHA-256 in hex, plus the original extension.
fn hashed_file_name(url: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let digest = hex::encode(&hasher.finalize()[..16]);

    match Path::new(file_name_of(url))
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(ext) if !ext.is_empty() => format!("{digest}.{ext}"),
        _ => digest,
    }
}

/// Returns the default persistent-data directory.
fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "awill", "imgdisp").map_or_else(
        || std::env::temp_dir().join("imgdisp").join("images"),
        |dirs| dirs.data_dir().join("images"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_store() -> (LocalStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::new(temp_dir.path().to_path_buf())
            .await
            .unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_derive_path_uses_file_name() {
        let (store, temp) = create_test_store().await;
        let path = store.derive_path("https://example.com/uploads/2016/12/Velajuel_Icon.png");
        assert_eq!(path, temp.path().join("Velajuel_Icon.png"));
    }

    #[tokio::test]
    async fn test_same_basename_collides() {
        let (store, _temp) = create_test_store().await;
        assert_eq!(
            store.derive_path("http://a.example/img.png"),
            store.derive_path("http://b.example/other/img.png")
        );
    }

    #[tokio::test]
    async fn test_hashed_keys_do_not_collide() {
        let (store, _temp) = create_test_store().await;
        let store = store.with_key_mode(CacheKeyMode::Hashed);
        let a = store.derive_path("http://a.example/img.png");
        let b = store.derive_path("http://b.example/other/img.png");

        assert_ne!(a, b);
        assert_eq!(a.extension().unwrap(), "png");
        assert_eq!(a.file_stem().unwrap().len(), 32);
        assert_eq!(a, store.derive_path("http://a.example/img.png"));
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let (store, _temp) = create_test_store().await;
        let path = store.derive_path("http://x/img.png");
        let data = b"test image data";

        assert!(!store.exists(&path).await);
        store.write(&path, data).await.unwrap();
        assert!(store.exists(&path).await);

        let fetched = store.read(&path).await.unwrap();
        assert_eq!(fetched.bytes.as_ref(), data);
        assert_eq!(fetched.byte_count(), data.len() as u64);
    }

    #[tokio::test]
    async fn test_write_overwrites() {
        let (store, _temp) = create_test_store().await;
        let path = store.derive_path("http://x/img.png");

        store.write(&path, b"first version").await.unwrap();
        store.write(&path, b"second").await.unwrap();

        assert_eq!(store.read(&path).await.unwrap().bytes.as_ref(), b"second");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_degenerate_path_is_refused() {
        let (store, _temp) = create_test_store().await;
        let path = store.derive_path("http://x/dir/");

        assert!(!store.exists(&path).await);
        let err = store.write(&path, b"data").await.unwrap_err();
        assert!(matches!(err, CacheError::InvalidKey(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_read_missing_file_fails() {
        let (store, _temp) = create_test_store().await;
        let path = store.derive_path("http://x/missing.png");
        assert!(store.read(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_new_creates_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("nested").join("images");
        let store = LocalStore::new(root.clone()).await.unwrap();
        assert!(root.is_dir());
        assert_eq!(store.root(), root.as_path());
    }
}

//! Fetch-or-cache image loading orchestrator.
//!
//! Local store first; otherwise the network, gated on reachability. Fresh
//! downloads are persisted before the bytes go to the presenter.

use std::sync::Arc;

use bytes::Bytes;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::local_store::LocalStore;
use crate::domain::entities::{DisplayUnit, ImageSource, LoadRequest, LoadingGuard};
use crate::domain::errors::{LoadError, LoadResult};
use crate::domain::ports::{FetcherPort, PresenterPort, ReachabilityPort};

/// Loads images into display units, one in-flight load per unit.
#[derive(Clone)]
pub struct ImageLoader {
    store: Arc<LocalStore>,
    fetcher: Arc<dyn FetcherPort>,
    reachability: Arc<dyn ReachabilityPort>,
    presenter: Arc<dyn PresenterPort>,
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl ImageLoader {
    /// Creates a loader from its collaborators.
    #[must_use]
    pub fn new(
        store: Arc<LocalStore>,
        fetcher: Arc<dyn FetcherPort>,
        reachability: Arc<dyn ReachabilityPort>,
        presenter: Arc<dyn PresenterPort>,
    ) -> Self {
        Self {
            store,
            fetcher,
            reachability,
            presenter,
        }
    }

    /// Starts loading `url` into `unit` on a background task.
    ///
    /// Returns `None` without doing anything if the unit is already loading.
    /// The handle resolves to the outcome; dropping it does not cancel the load.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn load(
        &self,
        url: &str,
        unit: &Arc<DisplayUnit>,
    ) -> Option<JoinHandle<LoadResult<ImageSource>>> {
        let (guard, request) = self.begin(url, unit)?;
        let loader = self.clone();
        Some(tokio::spawn(async move { loader.run(request, guard).await }))
    }

    /// Loads `url` into `unit` on the current task.
    ///
    /// # Errors
    /// Returns [`LoadError::AlreadyLoading`] if the unit is busy, otherwise
    /// whatever ended the load.
    pub async fn load_now(&self, url: &str, unit: &Arc<DisplayUnit>) -> LoadResult<ImageSource> {
        let (guard, request) = self.begin(url, unit).ok_or(LoadError::AlreadyLoading)?;
        self.run(request, guard).await
    }

    /// Takes the unit's guard and resolves the URL and cache path.
    fn begin(&self, url: &str, unit: &Arc<DisplayUnit>) -> Option<(LoadingGuard, LoadRequest)> {
        let Some(guard) = unit.try_begin_load() else {
            warn!(
                unit = %unit.id(),
                url = %url,
                "Could not load url because this image is already loading"
            );
            return None;
        };

        let url = if url.is_empty() {
            warn!(
                unit = %unit.id(),
                default_url = %unit.default_url(),
                "Url was empty, using the unit's default url"
            );
            unit.default_url().to_string()
        } else {
            url.to_string()
        };

        let request = LoadRequest {
            target_path: self.store.derive_path(&url),
            url,
            unit: Arc::clone(unit),
        };
        Some((guard, request))
    }

    /// Runs an accepted request. The unit goes back to Idle when `_guard`
    /// drops, whichever way this returns.
    async fn run(&self, request: LoadRequest, _guard: LoadingGuard) -> LoadResult<ImageSource> {
        let result = if self.store.exists(&request.target_path).await {
            self.load_local(&request).await
        } else if self.reachability.is_network_reachable().await {
            self.load_remote(&request).await
        } else {
            error!(unit = %request.unit.id(), url = %request.url, "No internet connection");
            Err(LoadError::Unreachable)
        };

        if let Ok(source) = &result {
            debug!(unit = %request.unit.id(), url = %request.url, source = %source, "Image ready");
        }
        result
    }

    async fn load_local(&self, request: &LoadRequest) -> LoadResult<ImageSource> {
        let path = &request.target_path;
        debug!(path = %path.display(), "Loading from disk");

        let fetched = self.store.read(path).await.map_err(|e| {
            error!(path = %path.display(), error = %e, "Load from disk failed");
            LoadError::from(e)
        })?;
        debug!(path = %path.display(), size = fetched.byte_count(), "Load from disk completed");

        if fetched.is_empty() {
            error!(path = %path.display(), "Load from disk returned no bytes");
            return Err(LoadError::EmptyPayload {
                origin: ImageSource::DiskCache,
            });
        }

        self.present(fetched.bytes, request).await?;
        Ok(ImageSource::DiskCache)
    }

    async fn load_remote(&self, request: &LoadRequest) -> LoadResult<ImageSource> {
        let url = &request.url;
        info!(url = %url, "Downloading from web");

        let fetched = self.fetcher.fetch_remote(url).await.map_err(|e| {
            error!(url = %url, error = %e, "Download failed");
            LoadError::from(e)
        })?;
        info!(url = %url, size = fetched.byte_count(), "Download completed");

        if fetched.is_empty() {
            error!(url = %url, "Download returned no bytes");
            return Err(LoadError::EmptyPayload {
                origin: ImageSource::Network,
            });
        }

        let path = &request.target_path;
        debug!(path = %path.display(), "Saving image to disk");
        match self.store.write(path, &fetched.bytes).await {
            Ok(()) => debug!(path = %path.display(), "Image save completed"),
            Err(e) => error!(path = %path.display(), error = %e, "Failed to save image to disk"),
        }

        self.present(fetched.bytes, request).await?;
        Ok(ImageSource::Network)
    }

    async fn present(&self, bytes: Bytes, request: &LoadRequest) -> LoadResult<()> {
        self.presenter
            .present(bytes, &request.unit)
            .await
            .map_err(|e| {
                error!(
                    unit = %request.unit.id(),
                    url = %request.url,
                    error = %e,
                    "Failed to present image"
                );
                LoadError::from(e)
            })
    }
}

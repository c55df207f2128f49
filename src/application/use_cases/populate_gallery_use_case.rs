//! Populate gallery use case implementation.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tracing::{debug, info, warn};

use crate::application::dto::{GallerySummary, UnitReport};
use crate::domain::entities::{DisplayRect, DisplayUnit};
use crate::infrastructure::image::ImageLoader;

/// Creates one display unit per URL and starts loading each one.
#[derive(Debug, Clone)]
pub struct PopulateGalleryUseCase {
    loader: ImageLoader,
    rect: DisplayRect,
    container: String,
}

impl PopulateGalleryUseCase {
    /// Creates the use case for units of size `rect` inside `container`.
    #[must_use]
    pub fn new(loader: ImageLoader, rect: DisplayRect, container: impl Into<String>) -> Self {
        Self {
            loader,
            rect,
            container: container.into(),
        }
    }

    /// Instantiates a unit per URL and kicks off its load.
    ///
    /// Loads run in the background; the returned units report progress
    /// through [`DisplayUnit::is_ready`]. With no URLs but a default URL, a
    /// single unit is created that loads the default.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn execute(&self, urls: &[String], default_url: &str) -> Vec<Arc<DisplayUnit>> {
        let urls = Self::effective_urls(urls, default_url);
        let units = self.create_units(urls.len(), default_url);
        for (unit, url) in units.iter().zip(&urls) {
            let _ = self.loader.load(url, unit);
        }
        units
    }

    /// Like [`Self::execute`], but drives every load to completion and
    /// reports each unit's outcome.
    pub async fn execute_and_join(&self, urls: &[String], default_url: &str) -> GallerySummary {
        let urls = Self::effective_urls(urls, default_url);
        let units = self.create_units(urls.len(), default_url);

        let results = join_all(
            units
                .iter()
                .zip(&urls)
                .map(|(unit, url)| self.loader.load_now(url, unit)),
        )
        .await;

        let units = units
            .iter()
            .zip(results)
            .map(|(unit, result)| {
                let mut report = UnitReport::from_unit(unit);
                match result {
                    Ok(source) => report.source = Some(source),
                    Err(e) => {
                        warn!(unit = %unit.id(), error = %e, "Image failed to load");
                        report.error = Some(e.to_string());
                    }
                }
                report
            })
            .collect();

        GallerySummary { units }
    }

    /// Polls until every unit is idle.
    pub async fn wait_until_ready(&self, units: &[Arc<DisplayUnit>], poll_interval: Duration) {
        let mut ticker = tokio::time::interval(poll_interval);
        loop {
            ticker.tick().await;
            let pending = units.iter().filter(|u| !u.is_ready()).count();
            if pending == 0 {
                return;
            }
            debug!(pending, "Waiting for images");
        }
    }

    /// Snapshots what each unit shows.
    #[must_use]
    pub fn summarize(&self, units: &[Arc<DisplayUnit>]) -> GallerySummary {
        GallerySummary {
            units: units.iter().map(|u| UnitReport::from_unit(u)).collect(),
        }
    }

    fn effective_urls(urls: &[String], default_url: &str) -> Vec<String> {
        if urls.is_empty() && !default_url.is_empty() {
            debug!(default_url = %default_url, "No urls given, loading the default url");
            return vec![String::new()];
        }
        if urls.is_empty() {
            warn!("No image urls configured");
        }
        urls.to_vec()
    }

    fn create_units(&self, count: usize, default_url: &str) -> Vec<Arc<DisplayUnit>> {
        let units: Vec<_> = (0..count)
            .map(|_| {
                Arc::new(
                    DisplayUnit::new(self.rect)
                        .with_default_url(default_url)
                        .with_parent(self.container.clone()),
                )
            })
            .collect();
        info!(count = units.len(), container = %self.container, "Gallery populated");
        units
    }
}

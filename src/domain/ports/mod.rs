//! Port definitions for the image loading workflow.

mod fetcher_port;
mod presenter_port;
mod reachability_port;

pub use fetcher_port::{FetchResult, FetcherPort};
pub use presenter_port::{PresentError, PresenterPort};
pub use reachability_port::ReachabilityPort;

#[cfg(test)]
pub use presenter_port::MockPresenterPort;
#[cfg(test)]
pub use reachability_port::MockReachabilityPort;

#[cfg(test)]
pub mod mocks {
    //! Hand-written port doubles for tests that need to script or observe calls.

    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use bytes::Bytes;
    use parking_lot::Mutex;
    use tokio::sync::Semaphore;

    use super::{FetchResult, FetcherPort, PresentError, PresenterPort};
    use crate::domain::entities::{DisplayUnit, Fetched, UnitId};
    use crate::domain::errors::FetchError;

    /// Fetcher that answers from a fixed table.
    pub struct StubFetcher {
        responses: Mutex<HashMap<String, FetchResult>>,
        requested: Mutex<Vec<String>>,
        calls: AtomicUsize,
        gate: Option<Arc<Semaphore>>,
    }

    impl StubFetcher {
        /// Creates a fetcher with no known URLs.
        pub fn new() -> Self {
            Self {
                responses: Mutex::new(HashMap::new()),
                requested: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }

        /// Every fetch waits for a permit from `gate` before answering.
        pub fn gated(gate: Arc<Semaphore>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::new()
            }
        }

        /// Answers `url` with `bytes`.
        pub fn with_bytes(self, url: &str, bytes: impl Into<Bytes>) -> Self {
            self.responses
                .lock()
                .insert(url.to_string(), Ok(Fetched::new(bytes)));
            self
        }

        /// Answers `url` with `error`.
        pub fn with_error(self, url: &str, error: FetchError) -> Self {
            self.responses.lock().insert(url.to_string(), Err(error));
            self
        }

        /// Number of fetches issued.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// URLs fetched, in call order.
        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().clone()
        }
    }

    impl Default for StubFetcher {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl FetcherPort for StubFetcher {
        async fn fetch_remote(&self, url: &str) -> FetchResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requested.lock().push(url.to_string());
            if let Some(gate) = &self.gate {
                let _permit = gate.acquire().await;
            }
            self.responses
                .lock()
                .get(url)
                .cloned()
                .unwrap_or_else(|| Err(FetchError::transport(format!("no route to {url:?}"))))
        }
    }

    /// Presenter that records what it was given.
    #[derive(Default)]
    pub struct RecordingPresenter {
        presented: Mutex<Vec<(UnitId, Bytes)>>,
    }

    impl RecordingPresenter {
        /// Creates a presenter with nothing recorded.
        pub fn new() -> Self {
            Self::default()
        }

        /// Unit and bytes of every call, in order.
        pub fn presented(&self) -> Vec<(UnitId, Bytes)> {
            self.presented.lock().clone()
        }

        /// Number of calls.
        pub fn count(&self) -> usize {
            self.presented.lock().len()
        }
    }

    #[async_trait]
    impl PresenterPort for RecordingPresenter {
        async fn present(&self, bytes: Bytes, unit: &DisplayUnit) -> Result<(), PresentError> {
            self.presented.lock().push((unit.id(), bytes));
            Ok(())
        }
    }
}

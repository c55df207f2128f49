//! Image handling infrastructure.
//!
//! This module provides:
//! - A flat on-disk store keyed by URL file name
//! - Local and remote byte fetching
//! - Network reachability checks
//! - The fetch-or-cache loading orchestrator

/// Local and remote byte fetching.
pub mod fetcher;
/// Fetch-or-cache orchestrator.
pub mod loader;
/// On-disk image store.
pub mod local_store;
/// Network reachability checks.
pub mod reachability;

#[cfg(test)]
pub(crate) mod test_server;

pub use fetcher::{FetcherConfig, HttpFetcher, fetch_local, resolve_local_resource};
pub use loader::ImageLoader;
pub use local_store::{CacheKeyMode, LocalStore};
pub use reachability::{
    DEFAULT_PROBE_URL, FixedReachability, ProbeReachability, ReachabilityMode, RouteReachability,
    build_reachability,
};

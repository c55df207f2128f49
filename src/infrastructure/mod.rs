//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Image fetching, local persistence and reachability checks.
pub mod image;

pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, StorageManager};
pub use image::{
    CacheKeyMode, FetcherConfig, HttpFetcher, ImageLoader, LocalStore, ReachabilityMode,
    build_reachability,
};

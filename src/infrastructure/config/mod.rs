//! Application configuration.

/// Configuration file model.
pub mod app_config;
/// Command-line arguments.
pub mod args;
/// Configuration file persistence.
pub mod storage;

pub use app_config::{AppConfig, DisplayConfig, FetchConfig, LogLevel, ReachabilityConfig};
pub use args::CliArgs;
pub use storage::{ConfigError, StorageManager};

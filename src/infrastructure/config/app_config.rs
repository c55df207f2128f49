//! Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::args::CliArgs;
use crate::domain::entities::DisplayRect;
use crate::infrastructure::image::{
    CacheKeyMode, DEFAULT_PROBE_URL, FetcherConfig, ReachabilityMode,
};

const APP_NAME: &str = "imgdisp";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "awill";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path. Logs go to stderr when unset.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Persistent-data directory for cached images.
    /// Defaults to the platform data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// URL loaded by units that are asked to load an empty URL.
    #[serde(default)]
    pub default_url: String,

    /// Images to load, one display unit each.
    #[serde(default)]
    pub urls: Vec<String>,

    /// How cache file names are derived from URLs.
    #[serde(default)]
    pub cache_key: CacheKeyMode,

    /// Display unit configuration.
    #[serde(default)]
    pub display: DisplayConfig,

    /// HTTP fetch configuration.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Reachability check configuration.
    #[serde(default)]
    pub reachability: ReachabilityConfig,
}

/// Display unit configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Width of each unit in pixels.
    #[serde(default = "default_unit_side")]
    pub width: u32,

    /// Height of each unit in pixels.
    #[serde(default = "default_unit_side")]
    pub height: u32,
}

impl DisplayConfig {
    /// Returns the unit rect.
    #[must_use]
    pub const fn rect(&self) -> DisplayRect {
        DisplayRect::new(self.width, self.height)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_unit_side(),
            height: default_unit_side(),
        }
    }
}

/// HTTP fetch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds; 0 disables it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent header.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl FetchConfig {
    /// Converts to the fetcher's configuration.
    #[must_use]
    pub fn to_fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            timeout_secs: self.timeout_secs,
            user_agent: self.user_agent.clone(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Reachability check configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReachabilityConfig {
    /// Strategy (route, probe, online, offline).
    #[serde(default)]
    pub mode: ReachabilityMode,

    /// URL used by the probe strategy.
    #[serde(default = "default_probe_url")]
    pub probe_url: String,

    /// Probe timeout in seconds.
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
}

impl ReachabilityConfig {
    /// Returns the probe timeout.
    #[must_use]
    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

impl Default for ReachabilityConfig {
    fn default() -> Self {
        Self {
            mode: ReachabilityMode::default(),
            probe_url: default_probe_url(),
            probe_timeout_secs: default_probe_timeout_secs(),
        }
    }
}

const fn default_unit_side() -> u32 {
    128
}

fn default_timeout_secs() -> u64 {
    FetcherConfig::default().timeout_secs
}

fn default_user_agent() -> String {
    FetcherConfig::default().user_agent
}

fn default_probe_url() -> String {
    DEFAULT_PROBE_URL.to_string()
}

const fn default_probe_timeout_secs() -> u64 {
    5
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(data_dir) = args.data_dir {
            self.data_dir = Some(data_dir);
        }
        if let Some(default_url) = args.default_url {
            self.default_url = default_url;
        }
        if !args.urls.is_empty() {
            self.urls = args.urls;
        }
        if let Some(cache_key) = args.cache_key {
            self.cache_key = cache_key;
        }
        if let Some(width) = args.width {
            self.display.width = width;
        }
        if let Some(height) = args.height {
            self.display.height = height;
        }
        if let Some(timeout_secs) = args.timeout_secs {
            self.fetch.timeout_secs = timeout_secs;
        }
        if let Some(mode) = args.reachability {
            self.reachability.mode = mode;
        }
        if let Some(probe_url) = args.probe_url {
            self.reachability.probe_url = probe_url;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            data_dir: None,
            default_url: String::new(),
            urls: Vec::new(),
            cache_key: CacheKeyMode::default(),
            display: DisplayConfig::default(),
            fetch: FetchConfig::default(),
            reachability: ReachabilityConfig::default(),
        }
    }
}

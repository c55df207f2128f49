use super::app_config::LogLevel;
use crate::infrastructure::image::{CacheKeyMode, ReachabilityMode};
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "imgdisp",
    version,
    about = "Fetch images, cache them locally and fit them into display units",
    long_about = None
)]
pub struct CliArgs {
    /// Image URLs to load, one display unit each.
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,

    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Directory cached images are stored in.
    #[arg(long, value_name = "PATH", env = "IMGDISP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// URL used when a unit is asked to load an empty URL.
    #[arg(long, value_name = "URL")]
    pub default_url: Option<String>,

    /// How cache file names are derived.
    #[arg(long, value_enum)]
    pub cache_key: Option<CacheKeyMode>,

    /// Display unit width in pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Display unit height in pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Request timeout in seconds (0 disables it).
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Reachability strategy.
    #[arg(long, value_enum)]
    pub reachability: Option<ReachabilityMode>,

    /// URL used by the probe reachability strategy.
    #[arg(long, value_name = "URL")]
    pub probe_url: Option<String>,
}

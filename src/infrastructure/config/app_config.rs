//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::infrastructure::discord::{DISCORD_API_BASE, DISCORD_EMOJI_CDN};
use crate::infrastructure::image::{
    DEFAULT_GIFSICLE_PROGRAM, DEFAULT_MAX_DIMENSION, DEFAULT_RESIZE_TIMEOUT, default_cache_dir,
};

const APP_NAME: &str = "emojibox";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";

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

/// Application configuration, read from `config.toml` and overridden by CLI.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Directory holding cached emoji files.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// REST API base URL.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Emoji CDN base URL.
    #[serde(default = "default_cdn_base_url")]
    pub cdn_base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Image normalization settings.
    #[serde(default)]
    pub normalizer: NormalizerConfig,
}

/// Image normalization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Bounding box edge length in pixels.
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,

    /// Program used to resize animated images.
    #[serde(default = "default_gifsicle_program")]
    pub gifsicle_program: String,

    /// Seconds one animated batch may run.
    #[serde(default = "default_resize_timeout_secs")]
    pub resize_timeout_secs: u64,
}

impl NormalizerConfig {
    /// Replaces a zero bounding box with the default, returning whether it did.
    pub fn sanitize(&mut self) -> bool {
        if self.max_dimension == 0 {
            self.max_dimension = default_max_dimension();
            return true;
        }
        false
    }

    /// Returns the animated batch timeout.
    #[must_use]
    pub const fn resize_timeout(&self) -> Duration {
        Duration::from_secs(self.resize_timeout_secs)
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            max_dimension: default_max_dimension(),
            gifsicle_program: default_gifsicle_program(),
            resize_timeout_secs: default_resize_timeout_secs(),
        }
    }
}

fn default_api_base_url() -> String {
    DISCORD_API_BASE.to_string()
}

fn default_cdn_base_url() -> String {
    DISCORD_EMOJI_CDN.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_max_dimension() -> u32 {
    DEFAULT_MAX_DIMENSION
}

fn default_gifsicle_program() -> String {
    DEFAULT_GIFSICLE_PROGRAM.to_string()
}

const fn default_resize_timeout_secs() -> u64 {
    DEFAULT_RESIZE_TIMEOUT.as_secs()
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(cache_dir) = &args.cache_dir {
            self.cache_dir = Some(cache_dir.clone());
        }
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("emojibox.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns effective cache directory.
    #[must_use]
    pub fn effective_cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(default_cache_dir)
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LogLevel::Info,
            cache_dir: None,
            api_base_url: default_api_base_url(),
            cdn_base_url: default_cdn_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            normalizer: NormalizerConfig::default(),
        }
    }
}

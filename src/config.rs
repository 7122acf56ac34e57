//! Configuration loading and constants.
//!
//! Loads application configuration from TOML files and defines constants for
//! HTTP cache headers, data source locations, logging and default paths.
//! `AppConfig` is the root configuration struct containing all settings.

use const_format::formatcp;
use http::HeaderValue;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// =============================================================================
// HTTP Response Cache Control
// =============================================================================
// Reference tables are immutable for the lifetime of the process, so the
// introspection endpoints can be cached briefly. Predictions are not
// deterministic and must never be served from a cache.

/// Table metadata and symptom listings - fixed until the process restarts
pub const HTTP_CACHE_REFERENCE_MAX_AGE: u32 = 300;

pub const CACHE_CONTROL_REFERENCE: &str =
    formatcp!("public, max-age={}", HTTP_CACHE_REFERENCE_MAX_AGE);

pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

// =============================================================================
// Data Source Constants
// =============================================================================

/// Maximum number of numbered precaution columns (Precaution_1..4)
pub const PRECAUTION_SLOTS: usize = 4;

/// Maximum number of numbered medication/diet/workout columns (X_1..5)
pub const RECOMMENDATION_SLOTS: usize = 5;

/// Description reported when a disease has attribute rows but no description row
pub const DESCRIPTION_NOT_AVAILABLE: &str = "Description not available";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default directory holding the CSV sources
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "medlookup=debug,tower_http=debug";

/// Default seconds to wait for in-flight requests on shutdown
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 30;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Location of the CSV sources
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Grace period for draining connections on SIGTERM/SIGINT
    #[serde(default = "HttpServerConfig::default_shutdown_grace")]
    pub shutdown_grace_seconds: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            shutdown_grace_seconds: Self::default_shutdown_grace(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        "127.0.0.1".to_string()
    }

    fn default_port() -> u16 {
        5000
    }

    fn default_shutdown_grace() -> u64 {
        DEFAULT_SHUTDOWN_GRACE_SECS
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directory containing the CSV files, resolved relative to the working directory
    #[serde(default = "DataConfig::default_dir")]
    pub dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
        }
    }
}

impl DataConfig {
    fn default_dir() -> PathBuf {
        PathBuf::from(DEFAULT_DATA_DIR)
    }
}

/// Cross-origin settings for browser clients
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins. Empty means any origin is allowed.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Parse the configured origins into header values.
    pub fn origin_values(&self) -> Result<Vec<HeaderValue>, ConfigError> {
        self.allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| {
                    ConfigError::Validation(format!("Invalid CORS origin: {:?}", origin))
                })
            })
            .collect()
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;

        if config.http.port == 0 {
            return Err(ConfigError::Validation(
                "http.port must be non-zero".to_string(),
            ));
        }
        config.cors.origin_values()?;

        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

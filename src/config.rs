use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;
use crate::search::PageSize;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Config {
    /// Open data API configuration
    #[validate(nested)]
    pub api: ApiConfig,

    /// Search defaults
    #[serde(default)]
    pub search: SearchDefaults,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from the default file location and environment
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("FOI_CONFIG_PATH")
            .unwrap_or_else(|_| "config/foi-search.toml".to_string());

        Self::load_from(&config_path)
    }

    /// Load configuration, layering `path` (if it exists) and environment
    /// variables (prefix: FOI_SEARCH_) over the built-in defaults
    pub fn load_from(path: &str) -> Result<Self> {
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            .add_source(config::File::new(path, config::FileFormat::Toml).required(false))
            .add_source(
                config::Environment::with_prefix("FOI_SEARCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            search: SearchDefaults::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApiConfig {
    /// Base URL of the open data API, without the `/v1` prefix
    #[validate(url)]
    #[serde(default = "default_api_url")]
    pub url: String,

    /// Request timeout (seconds)
    #[validate(range(min = 1, max = 600))]
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            timeout_secs: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchDefaults {
    /// Initial page size
    #[serde(default)]
    pub limit: PageSize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

// Default value functions
fn default_api_url() -> String {
    "https://api.opendata.je".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("foi-search/{}", env!("CARGO_PKG_VERSION"))
}

fn default_log_level() -> String {
    "info".to_string()
}

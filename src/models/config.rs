//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Vendor API access settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Token acquisition retry settings
    #[serde(default)]
    pub auth: AuthConfig,

    /// Catalog labelling settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Output sink settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let (config, error) = Self::load_or_fallback(&path);
        if let Some(e) = error {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
        }
        config
    }

    /// Like `load_or_default`, but hands the load error back instead of
    /// logging it, for callers that set up logging from the config.
    pub fn load_or_fallback(path: impl AsRef<Path>) -> (Self, Option<AppError>) {
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.account.trim().is_empty() {
            return Err(AppError::validation("api.account is empty"));
        }
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.api.page_size == 0 {
            return Err(AppError::validation("api.page_size must be > 0"));
        }
        if self.auth.max_attempts == Some(0) {
            return Err(AppError::validation(
                "auth.max_attempts must be > 0 when set",
            ));
        }
        if self.catalog.region.trim().is_empty() {
            return Err(AppError::validation("catalog.region is empty"));
        }
        Url::parse(&self.api.site)
            .map_err(|e| AppError::config(format!("api.site '{}': {e}", self.api.site)))?;
        if let Some(base) = &self.api.base_url {
            Url::parse(base)
                .map_err(|e| AppError::config(format!("api.base_url '{base}': {e}")))?;
        }
        Ok(())
    }
}

/// Vendor API access settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Profitbase account id, the subdomain of `profitbase.ru`
    #[serde(default = "defaults::account")]
    pub account: String,

    /// Public site the widget is embedded in; sent as referrer and used for listing URLs
    #[serde(default = "defaults::site")]
    pub site: String,

    /// JSON API version
    #[serde(default = "defaults::api_version")]
    pub api_version: u32,

    /// Overrides the derived `https://<account>.profitbase.ru/api/v<version>/json/` root
    #[serde(default)]
    pub base_url: Option<String>,

    /// Listings requested per page
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            account: defaults::account(),
            site: defaults::site(),
            api_version: defaults::api_version(),
            base_url: None,
            page_size: defaults::page_size(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Token acquisition retry settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Attempts before giving up; unset retries forever
    #[serde(default)]
    pub max_attempts: Option<u32>,

    /// Pause between attempts in milliseconds
    #[serde(default)]
    pub retry_delay_ms: u64,
}

impl AuthConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// Catalog labelling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Region appended to the complex name
    #[serde(default = "defaults::region")]
    pub region: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            region: defaults::region(),
        }
    }
}

/// Output sink settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print the JSON array
    #[serde(default = "defaults::pretty")]
    pub pretty: bool,

    /// Destination file; stdout when unset
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: defaults::pretty(),
            path: None,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    pub fn account() -> String {
        "pb13246".into()
    }
    pub fn site() -> String {
        "https://anapolisdom.ru/".into()
    }
    pub fn api_version() -> u32 {
        4
    }
    pub fn page_size() -> usize {
        100
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/89.0.4389.114 Safari/537.36".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn region() -> String {
        "Анапа".into()
    }
    pub fn pretty() -> bool {
        true
    }
    pub fn log_level() -> String {
        "info".into()
    }
}

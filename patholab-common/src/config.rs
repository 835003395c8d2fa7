//! API configuration loading and base URL resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// Environment variable overriding the API base URL
const BASE_URL_ENV: &str = "PATHOLAB_API_URL";

/// Compiled default, used when nothing else is configured
const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Default per-request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Resolved API configuration for the data-access clients
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every request path is joined onto
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// On-disk TOML shape (`~/.config/patholab/config.toml`)
#[derive(Debug, Clone, Default, Deserialize)]
struct TomlConfig {
    base_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl ApiConfig {
    /// Resolve configuration following the priority order:
    /// 1. Environment variable (highest priority)
    /// 2. TOML config file
    /// 3. Compiled default (fallback)
    pub fn load() -> Result<Self> {
        let env_url = std::env::var(BASE_URL_ENV).ok().filter(|v| !v.trim().is_empty());
        let toml_config = load_toml_config()?;

        if env_url.is_some() && toml_config.as_ref().is_some_and(|c| c.base_url.is_some()) {
            warn!(
                "API base URL set in both {} and the config file. Using the environment variable.",
                BASE_URL_ENV
            );
        }

        let mut config = ApiConfig::default();

        if let Some(file) = &toml_config {
            if let Some(url) = &file.base_url {
                config.base_url = url.trim_end_matches('/').to_string();
            }
            if let Some(secs) = file.request_timeout_secs {
                config.request_timeout_secs = secs;
            }
        }

        if let Some(url) = env_url {
            config.base_url = url.trim_end_matches('/').to_string();
            info!("API base URL loaded from environment variable");
        } else if toml_config.as_ref().is_some_and(|c| c.base_url.is_some()) {
            info!("API base URL loaded from config file");
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit TOML file, ignoring the
    /// environment and the platform config location
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let parsed = toml::from_str::<TomlConfig>(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

        let mut config = ApiConfig::default();
        if let Some(url) = parsed.base_url {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = parsed.request_timeout_secs {
            config.request_timeout_secs = secs;
        }
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the HTTP client cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::Config("API base URL must not be empty".to_string()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "API base URL must be http(s), got: {}",
                self.base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config("Request timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Read and parse the config file if one exists
fn load_toml_config() -> Result<Option<TomlConfig>> {
    let Some(path) = config_file_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)?;
    let parsed = toml::from_str::<TomlConfig>(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;
    Ok(Some(parsed))
}

/// Platform config file location (`<config dir>/patholab/config.toml`)
fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("patholab").join("config.toml"))
}

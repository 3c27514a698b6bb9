//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CATALOG_API_URL` - Base URL of the catalog API (defaults to the
//!   one production deployment; override to point tests at a mock server)
//! - `CATALOG_TIMEOUT_SECS` - Timeout for the random-book endpoint
//!   (default: 10)

use std::time::Duration;

use thiserror::Error;

/// Base URL of the production catalog deployment.
pub const DEFAULT_API_URL: &str = "https://bukuacak-9bdcb4ef2605.herokuapp.com/api/v1";

const DEFAULT_RANDOM_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Reject values that do not parse as absolute HTTP(S) URLs.
fn validate_base_url(raw: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_API_URL".to_string(), e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "CATALOG_API_URL".to_string(),
            format!("unsupported scheme '{}'", parsed.scheme()),
        ));
    }
    Ok(())
}

/// Catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API, without a trailing slash.
    pub base_url: String,
    /// Deadline applied to random-book requests.
    pub random_timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            random_timeout: Duration::from_secs(DEFAULT_RANDOM_TIMEOUT_SECS),
        }
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `CATALOG_API_URL` is not an absolute
    /// HTTP(S) URL, or if `CATALOG_TIMEOUT_SECS` is present but not a
    /// valid integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let raw_url = get_env_or_default("CATALOG_API_URL", DEFAULT_API_URL);
        validate_base_url(&raw_url)?;
        let base_url = normalize_base_url(&raw_url);

        let random_timeout = match get_optional_env("CATALOG_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar("CATALOG_TIMEOUT_SECS".to_string(), e.to_string())
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_RANDOM_TIMEOUT_SECS),
        };

        Ok(Self {
            base_url,
            random_timeout,
        })
    }

    /// Build a configuration pointing at an arbitrary base URL.
    ///
    /// Used by tests to target a local mock server.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            ..Self::default()
        }
    }
}

/// Strip any trailing slash so endpoint paths can be appended uniformly.
fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

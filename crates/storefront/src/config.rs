//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MARKTSTAND_SERVER_URL` - Base URL of the remote storefront API
//!
//! ## Optional
//! - `MARKTSTAND_PROFILE_DIR` - Directory holding the persisted profile
//!   store (default: `.marktstand`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the remote storefront API
    pub server_url: Url,
    /// Directory holding the persisted profile store
    pub profile_dir: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let server_url = parse_server_url(
            "MARKTSTAND_SERVER_URL",
            &get_required_env("MARKTSTAND_SERVER_URL")?,
        )?;
        let profile_dir = PathBuf::from(get_env_or_default("MARKTSTAND_PROFILE_DIR", ".marktstand"));

        Ok(Self {
            server_url,
            profile_dir,
        })
    }

    /// Create a configuration directly, bypassing the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `server_url` is not a valid absolute URL.
    pub fn new(server_url: &str, profile_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Ok(Self {
            server_url: parse_server_url("server_url", server_url)?,
            profile_dir: profile_dir.into(),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse and validate a server base URL.
fn parse_server_url(name: &str, value: &str) -> Result<Url, ConfigError> {
    let url =
        Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(name.to_string(), e.to_string()))?;

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidEnvVar(
            name.to_string(),
            "URL must have a host".to_string(),
        ));
    }

    Ok(url)
}

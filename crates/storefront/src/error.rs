//! Unified error type for the storefront client.
//!
//! Views receive `Result<T, AppError>` from every fallible core and API
//! operation and render failures as non-blocking inline messages; nothing
//! in this crate panics on a storage or network condition.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::store::StoreError;

/// Application-level error for the storefront client.
#[derive(Debug, Error)]
pub enum AppError {
    /// Persisting or opening the profile store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A remote API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// View entered without its required context (e.g., a product detail
    /// navigated to directly).
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

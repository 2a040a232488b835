//! Async client for the remote storefront API.
//!
//! The session & cart coordinator performs no network I/O of its own; this
//! client is the thin boundary the views call for auth, catalog, and order
//! data. Failures surface as typed [`ApiError`] values for the view layer
//! to render as non-blocking inline messages - there is no automatic retry
//! and no panic path.

mod types;

pub use types::{AuthOutcome, Order, OrderItem, Product};

use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use marktstand_core::ProductId;

use crate::config::ClientConfig;

/// Errors that can occur when talking to the remote API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request did not complete (connect failure, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Server returned {status}: {message}")]
    Status {
        status: StatusCode,
        message: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Client for the remote storefront API.
///
/// Cheaply cloneable; all clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client for the configured server.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        let base_url = config.server_url.as_str().trim_end_matches('/').to_string();
        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url,
            }),
        }
    }

    /// Log in with an existing account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on connect failure, rejected credentials
    /// (non-2xx), or an unexpected response shape.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthOutcome, ApiError> {
        self.post_auth("login", email, password).await
    }

    /// Register a new account. The server logs the account in immediately,
    /// so this returns the same outcome shape as [`Self::login`].
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on connect failure, a rejected registration, or
    /// an unexpected response shape.
    #[instrument(skip(self, password))]
    pub async fn register(&self, email: &str, password: &str) -> Result<AuthOutcome, ApiError> {
        self.post_auth("register", email, password).await
    }

    /// Fetch the full product list.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on connect failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_json("products", None).await
    }

    /// Fetch a single product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown ID (the inline
    /// "Produkt nicht gefunden" notice), other `ApiError` variants on
    /// transport or decode failures.
    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.get_json(&format!("products/{id}"), None).await
    }

    /// Fetch the order history of the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on connect failure, a rejected credential, or an
    /// unexpected response shape.
    #[instrument(skip(self, token))]
    pub async fn orders(&self, token: &SecretString) -> Result<Vec<Order>, ApiError> {
        self.get_json("orders", Some(token)).await
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    async fn post_auth(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthOutcome, ApiError> {
        let response = self
            .inner
            .client
            .post(self.endpoint(path))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        Self::decode(response, path).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&SecretString>,
    ) -> Result<T, ApiError> {
        let mut request = self.inner.client.get(self.endpoint(path));
        if let Some(token) = token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        Self::decode(response, path).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.base_url)
    }

    /// Turn a response into the expected payload or a typed error.
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        context: &str,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(context.to_string()));
        }

        if !status.is_success() {
            tracing::error!(
                status = %status,
                context = %context,
                body = %body.chars().take(200).collect::<String>(),
                "API returned non-success status"
            );
            return Err(ApiError::Status {
                status,
                message: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                context = %context,
                body = %body.chars().take(200).collect::<String>(),
                "Failed to parse API response"
            );
            ApiError::Parse(e)
        })
    }
}

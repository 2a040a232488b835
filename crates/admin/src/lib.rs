//! Marktstand admin panel API client.
//!
//! Thin async wrappers around the admin-only product CRUD endpoints. Every
//! call requires the bearer credential of an admin session; the route guard
//! in the storefront crate decides whether the admin views render at all,
//! this crate only talks to the server once they do.
//!
//! Product create/update submit multipart form data because the edit form
//! can carry a new image file alongside the text fields.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use marktstand_core::{Price, ProductId};

/// Errors that can occur when talking to the admin endpoints.
#[derive(Debug, Error)]
pub enum AdminApiError {
    /// The request did not complete (connect failure, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Server returned {status}: {message}")]
    Status {
        status: StatusCode,
        message: String,
    },

    /// The targeted product does not exist.
    #[error("Product not found: {0}")]
    NotFound(ProductId),
}

/// Fields of the admin product form.
///
/// `image_url` carries the currently stored image path so an update without
/// a new upload keeps it; `image` is a freshly selected file, if any.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub title: String,
    pub price: Price,
    /// Delimited description blob as composed by the edit form.
    pub description: String,
    pub image_url: Option<String>,
    pub image: Option<ImageUpload>,
}

/// An image file selected in the admin form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ProductForm {
    /// Assemble the multipart body the admin endpoints consume.
    ///
    /// Field names (`title`, `price`, `description`, `image_url`, `image`)
    /// are the server's contract.
    fn into_multipart(self) -> Form {
        let mut form = Form::new()
            .text("title", self.title)
            .text("price", self.price.amount().to_string())
            .text("description", self.description)
            .text("image_url", self.image_url.unwrap_or_default());

        if let Some(image) = self.image {
            form = form.part(
                "image",
                Part::bytes(image.bytes).file_name(image.file_name),
            );
        }

        form
    }
}

/// Client for the admin product CRUD endpoints.
///
/// Cheaply cloneable; all clones share one connection pool.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl AdminClient {
    /// Create a new admin client for the given server.
    #[must_use]
    pub fn new(server_url: &Url) -> Self {
        let base_url = server_url.as_str().trim_end_matches('/').to_string();
        Self {
            inner: Arc::new(AdminClientInner {
                client: reqwest::Client::new(),
                base_url,
            }),
        }
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns `AdminApiError` on connect failure or a non-success status.
    #[instrument(skip(self, token, form), fields(title = %form.title))]
    pub async fn insert_product(
        &self,
        token: &SecretString,
        form: ProductForm,
    ) -> Result<(), AdminApiError> {
        let request = self
            .inner
            .client
            .post(self.endpoint("admin/insert"))
            .bearer_auth(token.expose_secret())
            .multipart(form.into_multipart());

        Self::expect_success(request.send().await?, None).await
    }

    /// Update an existing product.
    ///
    /// # Errors
    ///
    /// Returns `AdminApiError::NotFound` for an unknown ID, other variants
    /// on transport failures or rejected input.
    #[instrument(skip(self, token, form))]
    pub async fn update_product(
        &self,
        token: &SecretString,
        id: ProductId,
        form: ProductForm,
    ) -> Result<(), AdminApiError> {
        let request = self
            .inner
            .client
            .put(self.endpoint(&format!("admin/update/{id}")))
            .bearer_auth(token.expose_secret())
            .multipart(form.into_multipart());

        Self::expect_success(request.send().await?, Some(id)).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `AdminApiError::NotFound` for an unknown ID, other variants
    /// on transport failures.
    #[instrument(skip(self, token))]
    pub async fn delete_product(
        &self,
        token: &SecretString,
        id: ProductId,
    ) -> Result<(), AdminApiError> {
        let request = self
            .inner
            .client
            .delete(self.endpoint(&format!("admin/delete/{id}")))
            .bearer_auth(token.expose_secret());

        Self::expect_success(request.send().await?, Some(id)).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.base_url)
    }

    /// Check the response status, mapping failures to typed errors.
    async fn expect_success(
        response: reqwest::Response,
        id: Option<ProductId>,
    ) -> Result<(), AdminApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        if status == StatusCode::NOT_FOUND
            && let Some(id) = id
        {
            return Err(AdminApiError::NotFound(id));
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!(
            status = %status,
            body = %body.chars().take(200).collect::<String>(),
            "Admin API returned non-success status"
        );
        Err(AdminApiError::Status {
            status,
            message: body.chars().take(200).collect(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn client(base: &str) -> AdminClient {
        AdminClient::new(&Url::parse(base).unwrap())
    }

    #[test]
    fn test_endpoint_paths() {
        let admin = client("http://localhost:3001/");
        assert_eq!(
            admin.endpoint("admin/insert"),
            "http://localhost:3001/admin/insert"
        );
        assert_eq!(
            admin.endpoint(&format!("admin/update/{}", ProductId::new(42))),
            "http://localhost:3001/admin/update/42"
        );
    }

    #[test]
    fn test_form_assembles_with_and_without_image() {
        let form = ProductForm {
            title: "Widget".to_string(),
            price: Price::new(Decimal::new(1999, 2)),
            description: "Farbe: Rot | Größe: M".to_string(),
            image_url: Some("img/42.jpg".to_string()),
            image: None,
        };
        // Building the multipart body must not panic for either shape
        let _ = form.clone().into_multipart();

        let with_image = ProductForm {
            image: Some(ImageUpload {
                file_name: "neu.jpg".to_string(),
                bytes: vec![0xFF, 0xD8, 0xFF],
            }),
            ..form
        };
        let _ = with_image.into_multipart();
    }

    #[test]
    fn test_error_display() {
        let err = AdminApiError::NotFound(ProductId::new(7));
        assert_eq!(err.to_string(), "Product not found: 7");
    }

    #[tokio::test]
    async fn test_connect_failure_surfaces_as_http_error() {
        let admin = client("http://127.0.0.1:9");
        let token = SecretString::from("bearer-abc");
        let result = admin.delete_product(&token, ProductId::new(1)).await;
        assert!(matches!(result, Err(AdminApiError::Http(_))));
    }
}

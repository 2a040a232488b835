//! Wire types for the remote storefront API.
//!
//! These mirror the JSON shapes the server produces; the client never
//! reshapes them beyond deserialization. Orders are server-owned and
//! read-only - they are fetched and rendered, never cached or reconciled
//! with the cart.

use chrono::{DateTime, Utc};
use marktstand_core::{Email, OrderId, Price, ProductId};
use serde::Deserialize;

/// A product as listed and shown on detail views.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    pub title: String,
    pub price: Price,
    /// Raw delimited description blob; see [`crate::description`].
    #[serde(default)]
    pub description: Option<String>,
    /// Server-relative image path; views substitute a placeholder when absent.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A past order, as returned by `GET /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub order_date: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    pub total_amount: Price,
}

/// One position within an [`Order`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub title: String,
    pub price: Price,
    pub quantity: u32,
    #[serde(default)]
    pub description: String,
}

/// Successful response of the login and registration endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthOutcome {
    /// Opaque bearer credential for subsequent authenticated calls.
    pub token: String,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
    pub email: Email,
}

//! The shopping cart: an ordered sequence of lines, mirrored to the
//! profile store on every mutation.
//!
//! The cart trusts the values supplied by the product view at add-time;
//! there is no reconciliation against live stock or price. Adding the same
//! product twice produces two independent lines - merge-by-id semantics are
//! deliberately not implemented until their quantity behavior is decided.

use marktstand_core::{Price, ProductId};
use serde::{Deserialize, Serialize};

use crate::api::Product;
use crate::store::{ProfileStore, StoreError, keys};

/// One product entry recorded in the cart.
///
/// The serde renames pin the persisted field names (`price`, `image_url`);
/// existing profiles depend on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub title: String,
    #[serde(rename = "price")]
    pub unit_price: Price,
    /// Raw delimited description blob; may be empty.
    pub description: String,
    #[serde(rename = "image_url", default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl From<&Product> for CartLine {
    /// Capture a product as shown on the detail view at add-time.
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.product_id,
            title: product.title.clone(),
            unit_price: product.price,
            description: product.description.clone().unwrap_or_default(),
            image_ref: product.image_url.clone(),
        }
    }
}

/// Ordered cart contents, kept equal to the persisted `cart` entry.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    lines: Vec<CartLine>,
}

impl CartState {
    /// Read the cart from the profile store.
    ///
    /// A missing entry yields the empty cart. A malformed entry is logged
    /// and also yields the empty cart - hydration never fails.
    #[must_use]
    pub fn hydrate(store: &dyn ProfileStore) -> Self {
        let lines = store.get(keys::CART).map_or_else(Vec::new, |raw| {
            serde_json::from_str::<Vec<CartLine>>(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to parse persisted cart, starting empty");
                Vec::new()
            })
        });
        Self { lines }
    }

    /// Append a line to the end of the cart and persist the full sequence.
    ///
    /// Duplicate `product_id`s append independent lines. When this returns
    /// `Ok`, both [`Self::lines`] and the persisted entry reflect the new
    /// contents.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails; the cart is unchanged then.
    pub fn add(&mut self, store: &dyn ProfileStore, line: CartLine) -> Result<(), StoreError> {
        let mut next = self.lines.clone();
        next.push(line);
        self.commit(store, next)
    }

    /// Remove the line at `index` and persist. Out-of-range indices are a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails; the cart is unchanged then.
    pub fn remove(&mut self, store: &dyn ProfileStore, index: usize) -> Result<(), StoreError> {
        if index >= self.lines.len() {
            return Ok(());
        }
        let mut next = self.lines.clone();
        next.remove(index);
        self.commit(store, next)
    }

    /// Empty the cart and remove the persisted entry.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails; the cart is unchanged then.
    pub fn clear(&mut self, store: &dyn ProfileStore) -> Result<(), StoreError> {
        store.remove(keys::CART)?;
        self.lines.clear();
        Ok(())
    }

    /// Persist `next`, then commit it as the in-memory state.
    fn commit(&mut self, store: &dyn ProfileStore, next: Vec<CartLine>) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(&next)?;
        store.set(keys::CART, &encoded)?;
        self.lines = next;
        Ok(())
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines, as shown by the navigation badge.
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of unit prices across all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(|line| line.unit_price).sum()
    }
}

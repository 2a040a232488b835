//! Root application state shared across views.
//!
//! One [`AppState`] is created when the application boots; session and cart
//! hydrate from the profile store exactly once, and every view reads and
//! mutates state through this container (dependency injection, never
//! ambient globals). Mutations are atomic from the caller's point of view:
//! the store write completes before the in-memory state commits, so a
//! failed write leaves both sides consistent and no partial state is ever
//! observable.

use std::sync::{Arc, PoisonError, RwLock};

use secrecy::SecretString;

use marktstand_core::Price;

use crate::api::{ApiClient, AuthOutcome};
use crate::cart::{CartLine, CartState};
use crate::config::ClientConfig;
use crate::guard::{self, Admission, Capability};
use crate::session::SessionState;
use crate::store::{FileStore, ProfileStore, StoreError};

/// Application state shared across all views.
///
/// Cheaply cloneable via `Arc`; all clones observe the same session and
/// cart.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ClientConfig,
    store: Arc<dyn ProfileStore>,
    session: RwLock<SessionState>,
    cart: RwLock<CartState>,
    api: ApiClient,
}

impl AppState {
    /// Open the profile store at the configured directory and hydrate
    /// session and cart from it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the profile directory cannot be created or
    /// read. A merely malformed profile does not fail here; it hydrates as
    /// empty state.
    pub fn open(config: ClientConfig) -> Result<Self, StoreError> {
        let store = FileStore::open(&config.profile_dir)?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Build state on top of an existing store (tests, ephemeral profiles).
    #[must_use]
    pub fn with_store(config: ClientConfig, store: Arc<dyn ProfileStore>) -> Self {
        let session = SessionState::hydrate(store.as_ref());
        let cart = CartState::hydrate(store.as_ref());
        let api = ApiClient::new(&config);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                session: RwLock::new(session),
                cart: RwLock::new(cart),
                api,
            }),
        }
    }

    /// Get a reference to the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Get a reference to the remote API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Snapshot of the current session state.
    #[must_use]
    pub fn session(&self) -> SessionState {
        self.inner
            .session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply a successful login or registration outcome.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting the session fails; neither the
    /// session nor the store changes in that case.
    pub fn login(&self, outcome: AuthOutcome) -> Result<(), StoreError> {
        let mut session = self
            .inner
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        session.login(
            self.inner.store.as_ref(),
            outcome.email,
            outcome.is_admin,
            SecretString::from(outcome.token),
        )
    }

    /// Log out: reset the session, clear the cart, and drop the persisted
    /// `cart`, `token`, `userEmail`, and `isAdmin` entries.
    ///
    /// The `Ok(())` return is the completion signal after which the view
    /// layer navigates to the public landing view.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting either reset fails.
    pub fn logout(&self) -> Result<(), StoreError> {
        let mut session = self
            .inner
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let mut cart = self
            .inner
            .cart
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        session.clear(self.inner.store.as_ref())?;
        cart.clear(self.inner.store.as_ref())?;
        Ok(())
    }

    /// Append a line to the cart.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails; the cart is unchanged then.
    pub fn add_to_cart(&self, line: CartLine) -> Result<(), StoreError> {
        self.inner
            .cart
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .add(self.inner.store.as_ref(), line)
    }

    /// Remove the cart line at `index`; out-of-range indices are a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails; the cart is unchanged then.
    pub fn remove_from_cart(&self, index: usize) -> Result<(), StoreError> {
        self.inner
            .cart
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(self.inner.store.as_ref(), index)
    }

    /// Snapshot of the cart lines in insertion order.
    #[must_use]
    pub fn cart_lines(&self) -> Vec<CartLine> {
        self.inner
            .cart
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .lines()
            .to_vec()
    }

    /// Number of cart lines, as shown by the navigation badge.
    #[must_use]
    pub fn cart_count(&self) -> usize {
        self.inner
            .cart
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .line_count()
    }

    /// Sum of unit prices across all cart lines.
    #[must_use]
    pub fn cart_subtotal(&self) -> Price {
        self.inner
            .cart
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .subtotal()
    }

    /// Admission decision for a view requiring `capability`, evaluated
    /// against the current session.
    #[must_use]
    pub fn admit(&self, capability: Capability) -> Admission {
        guard::admit(&self.session(), capability)
    }
}

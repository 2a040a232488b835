//! Session state: whether and how the user is authenticated.
//!
//! Hydrated once from the profile store at startup, mutated only by the
//! login/registration and logout flows, and read by everything else (the
//! navigation display, the route guard, the orders view). In-memory state is
//! the single read path; the store is a persistence boundary only.

use marktstand_core::Email;
use secrecy::{ExposeSecret, SecretString};

use crate::store::{ProfileStore, StoreError, keys};

/// In-memory record of the authenticated user, if any.
///
/// `is_admin` is stored independently of `logged_in` but is meaningless when
/// `logged_in` is false. No expiry check is performed client-side; the
/// credential is considered valid until the server rejects it or the user
/// logs out.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    logged_in: bool,
    is_admin: bool,
    user_email: Option<Email>,
    token: Option<SecretString>,
}

impl SessionState {
    /// Read session state from the profile store.
    ///
    /// A flag is true iff the stored value equals the literal `"true"`;
    /// absent or unexpected values default to false. An unparseable stored
    /// email is logged and hydrated as absent. Hydration never fails and is
    /// idempotent.
    #[must_use]
    pub fn hydrate(store: &dyn ProfileStore) -> Self {
        let logged_in = store.get(keys::IS_LOGGED_IN).as_deref() == Some("true");
        let is_admin = store.get(keys::IS_ADMIN).as_deref() == Some("true");

        let user_email = store.get(keys::USER_EMAIL).and_then(|raw| {
            Email::parse(&raw)
                .map_err(|e| {
                    tracing::warn!(error = %e, "Ignoring unparseable stored user email");
                })
                .ok()
        });

        let token = store.get(keys::TOKEN).map(SecretString::from);

        Self {
            logged_in,
            is_admin,
            user_email,
            token,
        }
    }

    /// Record a successful login or registration.
    ///
    /// Persists all four session keys, then commits the in-memory state, so
    /// a failed write leaves both sides unchanged from the caller's view.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting any key fails.
    pub fn login(
        &mut self,
        store: &dyn ProfileStore,
        email: Email,
        is_admin: bool,
        token: SecretString,
    ) -> Result<(), StoreError> {
        store.set(keys::IS_LOGGED_IN, "true")?;
        store.set(keys::IS_ADMIN, if is_admin { "true" } else { "false" })?;
        store.set(keys::USER_EMAIL, email.as_str())?;
        store.set(keys::TOKEN, token.expose_secret())?;

        self.logged_in = true;
        self.is_admin = is_admin;
        self.user_email = Some(email);
        self.token = Some(token);
        Ok(())
    }

    /// Reset the session to the logged-out state.
    ///
    /// Persists `isLoggedIn = "false"` and removes the identity, admin flag,
    /// and credential entries. The cart is cleared separately by the root
    /// coordinator as part of logout.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting any key fails.
    pub fn clear(&mut self, store: &dyn ProfileStore) -> Result<(), StoreError> {
        store.set(keys::IS_LOGGED_IN, "false")?;
        store.remove(keys::USER_EMAIL)?;
        store.remove(keys::IS_ADMIN)?;
        store.remove(keys::TOKEN)?;

        *self = Self::default();
        Ok(())
    }

    /// True iff a previously issued credential is considered valid.
    #[must_use]
    pub const fn logged_in(&self) -> bool {
        self.logged_in
    }

    /// True iff the logged-in user holds the admin capability.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Display identity of the logged-in user.
    #[must_use]
    pub const fn user_email(&self) -> Option<&Email> {
        self.user_email.as_ref()
    }

    /// Bearer credential for API calls that require authentication.
    #[must_use]
    pub const fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn logged_in_store() -> MemoryStore {
        MemoryStore::with_entries([
            (keys::IS_LOGGED_IN.to_string(), "true".to_string()),
            (keys::IS_ADMIN.to_string(), "true".to_string()),
            (keys::USER_EMAIL.to_string(), "kunde@example.com".to_string()),
            (keys::TOKEN.to_string(), "bearer-abc".to_string()),
        ])
    }

    #[test]
    fn test_hydrate_empty_store() {
        let store = MemoryStore::new();
        let session = SessionState::hydrate(&store);

        assert!(!session.logged_in());
        assert!(!session.is_admin());
        assert!(session.user_email().is_none());
        assert!(session.token().is_none());
    }

    #[test]
    fn test_hydrate_logged_in() {
        let store = logged_in_store();
        let session = SessionState::hydrate(&store);

        assert!(session.logged_in());
        assert!(session.is_admin());
        assert_eq!(
            session.user_email().map(Email::as_str),
            Some("kunde@example.com")
        );
        assert_eq!(
            session.token().map(ExposeSecret::expose_secret),
            Some("bearer-abc")
        );
    }

    #[test]
    fn test_hydrate_only_literal_true_counts() {
        let store = MemoryStore::with_entries([
            (keys::IS_LOGGED_IN.to_string(), "TRUE".to_string()),
            (keys::IS_ADMIN.to_string(), "1".to_string()),
        ]);
        let session = SessionState::hydrate(&store);

        assert!(!session.logged_in());
        assert!(!session.is_admin());
    }

    #[test]
    fn test_hydrate_unparseable_email_is_absent() {
        let store = MemoryStore::with_entries([
            (keys::IS_LOGGED_IN.to_string(), "true".to_string()),
            (keys::USER_EMAIL.to_string(), "not-an-email".to_string()),
        ]);
        let session = SessionState::hydrate(&store);

        assert!(session.logged_in());
        assert!(session.user_email().is_none());
    }

    #[test]
    fn test_hydrate_is_idempotent() {
        let store = logged_in_store();
        let first = SessionState::hydrate(&store);
        let second = SessionState::hydrate(&store);

        assert_eq!(first.logged_in(), second.logged_in());
        assert_eq!(first.is_admin(), second.is_admin());
        assert_eq!(first.user_email(), second.user_email());
    }

    #[test]
    fn test_login_persists_all_keys() {
        let store = MemoryStore::new();
        let mut session = SessionState::hydrate(&store);

        session
            .login(
                &store,
                Email::parse("kunde@example.com").unwrap(),
                false,
                SecretString::from("bearer-abc"),
            )
            .unwrap();

        assert!(session.logged_in());
        assert!(!session.is_admin());
        assert_eq!(store.get(keys::IS_LOGGED_IN), Some("true".to_string()));
        assert_eq!(store.get(keys::IS_ADMIN), Some("false".to_string()));
        assert_eq!(
            store.get(keys::USER_EMAIL),
            Some("kunde@example.com".to_string())
        );
        assert_eq!(store.get(keys::TOKEN), Some("bearer-abc".to_string()));
    }

    #[test]
    fn test_clear_resets_and_removes_keys() {
        let store = logged_in_store();
        let mut session = SessionState::hydrate(&store);

        session.clear(&store).unwrap();

        assert!(!session.logged_in());
        assert!(!session.is_admin());
        assert!(session.user_email().is_none());
        assert!(session.token().is_none());

        assert_eq!(store.get(keys::IS_LOGGED_IN), Some("false".to_string()));
        assert_eq!(store.get(keys::USER_EMAIL), None);
        assert_eq!(store.get(keys::IS_ADMIN), None);
        assert_eq!(store.get(keys::TOKEN), None);
    }
}

//! Per-profile key/value persistence boundary.
//!
//! Everything the client must survive a restart with - session flags and the
//! serialized cart - goes through a [`ProfileStore`]. The store holds plain
//! strings; structured values are JSON-encoded by their owning module on
//! write and parsed on read, with parse failures recovered locally (the
//! owning module falls back to its default state).
//!
//! Two implementations are provided: [`FileStore`] for a real on-disk
//! profile and [`MemoryStore`] for tests and ephemeral profiles.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Storage keys for persisted client state.
///
/// This is the stable schema views and future releases rely on; renaming a
/// key is a breaking change to existing profiles.
pub mod keys {
    /// `"true"` iff a credential from a previous login is considered valid.
    pub const IS_LOGGED_IN: &str = "isLoggedIn";

    /// `"true"` iff the logged-in user holds the admin capability.
    pub const IS_ADMIN: &str = "isAdmin";

    /// Display identity of the logged-in user; absent when logged out.
    pub const USER_EMAIL: &str = "userEmail";

    /// JSON-encoded ordered sequence of cart lines.
    pub const CART: &str = "cart";

    /// Opaque bearer credential; absent when logged out.
    pub const TOKEN: &str = "token";
}

/// Errors that can occur writing to or opening a profile store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading the profile file failed.
    #[error("failed to read profile store: {0}")]
    Read(#[source] std::io::Error),

    /// Writing the profile file failed.
    #[error("failed to write profile store: {0}")]
    Write(#[source] std::io::Error),

    /// Encoding the profile contents failed.
    #[error("failed to encode profile store: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A string-keyed persistence boundary scoped to one profile.
///
/// Writes are synchronous: when `set` or `remove` returns `Ok`, a reload
/// observes the new value. Reads are infallible; a malformed backing file
/// is recovered at open time, not surfaced per-read.
pub trait ProfileStore: Send + Sync {
    /// Get the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting the change fails; the previous
    /// value remains observable in that case.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the value stored under `key`. Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting the change fails; the previous
    /// value remains observable in that case.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

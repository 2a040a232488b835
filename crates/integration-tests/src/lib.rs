//! Integration tests for Marktstand.
//!
//! # Test Categories
//!
//! - `coordinator` - session & cart coordinator scenarios against a real
//!   on-disk profile store
//! - `live_api` - tests against a running storefront server (ignored by
//!   default; set `MARKTSTAND_SERVER_URL` and remove the ignore filter)
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p marktstand-integration-tests
//!
//! # Including the live-server tests
//! MARKTSTAND_SERVER_URL=http://localhost:3001 \
//!     cargo test -p marktstand-integration-tests -- --ignored
//! ```

use std::path::{Path, PathBuf};

use uuid::Uuid;

use marktstand_storefront::config::ClientConfig;

/// A throwaway profile directory, removed when dropped.
pub struct TestProfile {
    dir: PathBuf,
}

impl TestProfile {
    /// Create a unique, empty profile directory under the system temp dir.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: std::env::temp_dir().join(format!("marktstand-it-{}", Uuid::new_v4())),
        }
    }

    /// Path of the profile directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Client configuration pointing at this profile.
    ///
    /// # Panics
    ///
    /// Panics if the built-in server URL fails to parse, which would be a
    /// bug in the test helper itself.
    #[must_use]
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(&server_url(), self.dir.clone()).expect("valid test server URL")
    }
}

impl Default for TestProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestProfile {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

/// Base URL of the storefront server under test (configurable via
/// environment).
#[must_use]
pub fn server_url() -> String {
    std::env::var("MARKTSTAND_SERVER_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

//! On-disk profile store.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use super::{ProfileStore, StoreError};

/// File name of the profile inside the profile directory.
const PROFILE_FILE: &str = "profile.json";

/// A [`ProfileStore`] backed by a single JSON object file.
///
/// The full map is loaded once at open and rewritten on every mutation, so
/// the on-disk state always matches what `get` observes. Profile state is a
/// handful of short strings; rewriting it wholesale is cheaper than being
/// clever.
pub struct FileStore {
    path: PathBuf,
    map: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Open the profile store in `profile_dir`, creating the directory if
    /// needed.
    ///
    /// A missing profile file starts empty. A malformed one is logged and
    /// also starts empty - a corrupt profile must never prevent startup.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the directory cannot be created or the
    /// profile file exists but cannot be read.
    pub fn open(profile_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(profile_dir).map_err(StoreError::Write)?;
        let path = profile_dir.join(PROFILE_FILE);

        let map = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<HashMap<String, String>>(&contents) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Malformed profile store, starting from empty state"
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StoreError::Read(e)),
        };

        Ok(Self {
            path,
            map: RwLock::new(map),
        })
    }

    /// Write the given map to the profile file.
    fn persist(&self, map: &HashMap<String, String>) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, contents).map_err(StoreError::Write)
    }
}

impl ProfileStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self.map.write().unwrap_or_else(PoisonError::into_inner);
        let previous = map.insert(key.to_owned(), value.to_owned());
        if let Err(e) = self.persist(&map) {
            // Roll back so memory and disk stay equal
            match previous {
                Some(v) => map.insert(key.to_owned(), v),
                None => map.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self.map.write().unwrap_or_else(PoisonError::into_inner);
        let Some(previous) = map.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.persist(&map) {
            map.insert(key.to_owned(), previous);
            return Err(e);
        }
        Ok(())
    }
}

//! # File Storage
//!
//! One JSON file per key inside a data directory.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ~/.local/share/aurum/            (data_dir)                            │
//! │  ├── cart.json                    key "cart"                            │
//! │  ├── wishlist.json                key "wishlist"                        │
//! │  └── cart.json.tmp                only while a write is in flight      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Write Path
//! `set` writes the full value to `<key>.json.tmp` and renames it over
//! `<key>.json`. A crash mid-write leaves the previous value intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use super::StorageBackend;
use crate::error::{StoreError, StoreResult};

/// File-per-key storage rooted at a directory.
///
/// ## Example
/// ```rust,ignore
/// let storage = FileStorage::new("./data");
/// storage.set("cart", "[]")?;
/// ```
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Directory holding the `<key>.json` files. Created on first write.
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileStorage { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the file backing `key`.
    ///
    /// Keys become file names, so anything that could escape the directory
    /// is refused.
    pub fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

        if !valid {
            return Err(StoreError::Storage(format!(
                "Invalid storage key '{key}': use letters, digits, '_', '-' or '.'"
            )));
        }

        Ok(self.root.join(format!("{key}.json")))
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => {
                trace!(?path, bytes = contents.len(), "Read storage file");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        debug!(?path, bytes = value.len(), "Wrote storage file");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

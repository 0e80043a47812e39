//! # Storage Backends
//!
//! Key/value persistence behind the store.
//!
//! ## Backend Selection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     StorageBackend implementations                      │
//! │                                                                         │
//! │  MemoryStorage   HashMap behind a Mutex. Tests, throwaway sessions.    │
//! │                                                                         │
//! │  FileStorage     <data_dir>/<key>.json, one file per key.              │
//! │                  Written to <key>.json.tmp, then renamed over.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values are opaque strings. The store decides what goes in them.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::sync::Arc;

use crate::error::StoreResult;

/// String-keyed persistence used by the store.
///
/// Implementations must be safe to share between threads. Each call is
/// independent: the store performs its own read-modify-write sequencing.
pub trait StorageBackend: Send + Sync {
    /// Returns the stored value, or `None` if the key was never written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replaces the value under `key`.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes the key. Deleting a missing key succeeds.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<T: StorageBackend + ?Sized> StorageBackend for Arc<T> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

impl<T: StorageBackend + ?Sized> StorageBackend for Box<T> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

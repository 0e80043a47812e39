//! # Store Error Types
//!
//! Error types for storage, configuration and data-file loading.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error / toml::de::Error                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ├──► Store mutations: logged, never surfaced                      │
//! │       │                                                                 │
//! │       └──► Config / catalog loading: returned to the CLI (anyhow)       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Storage, config and data-file errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend read or write failed.
    ///
    /// ## When This Occurs
    /// - Data directory is not writable
    /// - Disk full
    /// - An injected backend refuses the write
    #[error("Storage error: {0}")]
    Storage(String),

    /// A value could not be encoded or decoded as JSON.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Configuration file or values are invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Catalog or pricing file could not be read or parsed.
    #[error("Failed to load {}: {message}", path.display())]
    Catalog { path: PathBuf, message: String },

    /// A core domain error bubbled up.
    #[error(transparent)]
    Core(#[from] aurum_core::CoreError),
}

impl StoreError {
    pub fn catalog(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        StoreError::Catalog {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Returns true if this error came from the configuration layer.
    pub fn is_config_error(&self) -> bool {
        matches!(self, StoreError::Config(_))
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::Config(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

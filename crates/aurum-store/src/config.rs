//! # Store Configuration
//!
//! Where the store keeps its data and where the static catalog lives.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     AURUM_DATA_DIR=/var/lib/aurum                                      │
//! │     AURUM_CART_KEY=cart                                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/aurum/aurum.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.aurum.storefront/aurum.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     platform data dir, keys "cart" / "wishlist", data/*.json            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # aurum.toml
//! data_dir = "/home/asha/.local/share/aurum"
//! cart_key = "cart"
//! wishlist_key = "wishlist"
//! catalog_path = "data/products.json"
//! pricing_path = "data/pricing.json"
//! currency_symbol = "₹"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::store::{StorageKeys, DEFAULT_CART_KEY, DEFAULT_WISHLIST_KEY};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "aurum.toml";

pub const ENV_DATA_DIR: &str = "AURUM_DATA_DIR";
pub const ENV_CART_KEY: &str = "AURUM_CART_KEY";
pub const ENV_WISHLIST_KEY: &str = "AURUM_WISHLIST_KEY";
pub const ENV_CATALOG: &str = "AURUM_CATALOG";
pub const ENV_PRICING: &str = "AURUM_PRICING";

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "aurum", "storefront")
}

fn default_data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("data"))
}

fn default_cart_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

fn default_wishlist_key() -> String {
    DEFAULT_WISHLIST_KEY.to_string()
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/products.json")
}

fn default_pricing_path() -> PathBuf {
    PathBuf::from("data/pricing.json")
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

/// Complete store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory for persisted cart and wishlist files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_cart_key")]
    pub cart_key: String,

    #[serde(default = "default_wishlist_key")]
    pub wishlist_key: String,

    /// Product catalog JSON (array of products).
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Pricing multipliers JSON.
    #[serde(default = "default_pricing_path")]
    pub pricing_path: PathBuf,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            data_dir: default_data_dir(),
            cart_key: default_cart_key(),
            wishlist_key: default_wishlist_key(),
            catalog_path: default_catalog_path(),
            pricing_path: default_pricing_path(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl StoreConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (aurum.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::Config("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Store config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        if self.cart_key.trim().is_empty() || self.wishlist_key.trim().is_empty() {
            return Err(StoreError::Config(
                "cart_key and wishlist_key must not be empty".into(),
            ));
        }

        if self.cart_key == self.wishlist_key {
            return Err(StoreError::Config(format!(
                "cart_key and wishlist_key must differ, both are '{}'",
                self.cart_key
            )));
        }

        if self.data_dir.as_os_str().is_empty() {
            return Err(StoreError::Config("data_dir must not be empty".into()));
        }

        Ok(())
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// [`StoreConfig::load`]).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.data_dir = PathBuf::from(dir);
        }

        if let Some(key) = lookup(ENV_CART_KEY) {
            self.cart_key = key;
        }

        if let Some(key) = lookup(ENV_WISHLIST_KEY) {
            self.wishlist_key = key;
        }

        if let Some(path) = lookup(ENV_CATALOG) {
            debug!(catalog = %path, "Overriding catalog path from environment");
            self.catalog_path = PathBuf::from(path);
        }

        if let Some(path) = lookup(ENV_PRICING) {
            self.pricing_path = PathBuf::from(path);
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys {
            cart: self.cart_key.clone(),
            wishlist: self.wishlist_key.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.cart_key, "cart");
        assert_eq!(config.wishlist_key, "wishlist");
        assert_eq!(config.currency_symbol, "₹");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = StoreConfig::default();

        config.cart_key = String::new();
        assert!(config.validate().is_err());

        config.cart_key = "wishlist".to_string();
        assert!(config.validate().is_err());

        config.cart_key = "bag".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_DATA_DIR, "/srv/aurum"),
            (ENV_CART_KEY, "bag"),
            (ENV_CATALOG, "/srv/catalog.json"),
        ]
        .into_iter()
        .collect();

        let mut config = StoreConfig::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.data_dir, PathBuf::from("/srv/aurum"));
        assert_eq!(config.cart_key, "bag");
        assert_eq!(config.wishlist_key, "wishlist");
        assert_eq!(config.catalog_path, PathBuf::from("/srv/catalog.json"));
        assert_eq!(config.pricing_path, PathBuf::from("data/pricing.json"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: StoreConfig = toml::from_str(r#"cart_key = "bag""#).unwrap();
        assert_eq!(config.cart_key, "bag");
        assert_eq!(config.wishlist_key, "wishlist");
        assert_eq!(config.currency_symbol, "₹");
    }

    #[test]
    fn test_save_then_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("aurum.toml");

        let config = StoreConfig {
            data_dir: dir.path().join("data"),
            wishlist_key: "saved".to_string(),
            ..StoreConfig::default()
        };
        config.save(Some(path.clone())).unwrap();

        let loaded: StoreConfig =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_file_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("aurum.toml");
        std::fs::write(&path, "cart_key = [").unwrap();

        assert!(StoreConfig::load(Some(path.clone())).is_err());
        let config = StoreConfig::load_or_default(Some(path));
        assert_eq!(config.cart_key, "cart");
    }
}

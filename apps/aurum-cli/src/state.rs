//! # Application State
//!
//! Everything a command needs, opened once per invocation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AppState                                                               │
//! │  ├── config    StoreConfig (file + env + CLI flags)                     │
//! │  ├── store     ShopStore<FileStorage>                                   │
//! │  ├── changed   set by store listeners, read after a mutation            │
//! │  └── json      print JSON instead of tables                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use aurum_core::{Catalog, Money, PricingTable};
use aurum_store::{load_catalog, load_pricing, Collection, FileStorage, ShopStore, StoreConfig};

pub struct AppState {
    pub config: StoreConfig,
    pub store: ShopStore<FileStorage>,
    pub json: bool,
    changed: Arc<AtomicBool>,
}

impl AppState {
    pub fn open(config: StoreConfig, json: bool) -> anyhow::Result<Self> {
        let store = ShopStore::open(&config)
            .with_context(|| format!("Failed to open store in {}", config.data_dir.display()))?;

        let changed = Arc::new(AtomicBool::new(false));
        for collection in [Collection::Cart, Collection::Wishlist] {
            let flag = Arc::clone(&changed);
            store.subscribe(collection, move || flag.store(true, Ordering::SeqCst));
        }

        Ok(AppState {
            config,
            store,
            json,
            changed,
        })
    }

    pub fn catalog(&self) -> anyhow::Result<Catalog> {
        load_catalog(&self.config.catalog_path).context("Product catalog unavailable")
    }

    pub fn pricing(&self) -> anyhow::Result<PricingTable> {
        load_pricing(&self.config.pricing_path).context("Pricing table unavailable")
    }

    /// Formats an amount with the configured currency symbol.
    pub fn money(&self, amount: Money) -> String {
        amount.format_with(&self.config.currency_symbol)
    }

    /// Returns whether the store reported a change since the last call.
    pub fn take_changed(&self) -> bool {
        self.changed.swap(false, Ordering::SeqCst)
    }

    /// The header badges: cart quantity and wishlist size.
    pub fn counters(&self) -> String {
        format!(
            "Cart: {} | Wishlist: {}",
            self.store.cart_count(),
            self.store.wishlist_count()
        )
    }
}

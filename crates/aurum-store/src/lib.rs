//! # aurum-store: Cart/Wishlist Store for Aurum Storefront
//!
//! Persists the shopper's cart and wishlist through an injected key/value
//! backend and tells interested parties when either changes.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Aurum Data Flow                                  │
//! │                                                                         │
//! │  CLI command (cart add R1 --metal Gold ...)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  aurum-store (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   ShopStore   │    │   Notifier    │    │  StoreConfig │  │   │
//! │  │   │  (store.rs)   │───►│  (events.rs)  │    │ (config.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ cart          │    │ cart changed  │    │ TOML + env   │  │   │
//! │  │   │ wishlist      │    │ wish changed  │    │              │  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘  │   │
//! │  │           │                                                     │   │
//! │  │           ▼                                                     │   │
//! │  │   ┌───────────────────────────────────┐                        │   │
//! │  │   │ StorageBackend (backend/)         │                        │   │
//! │  │   │  MemoryStorage  │  FileStorage    │                        │   │
//! │  │   └───────────────────────────────────┘                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/aurum/{cart,wishlist}.json                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The cart/wishlist store
//! - [`backend`] - Storage trait and implementations
//! - [`events`] - Change notification
//! - [`config`] - Configuration loading
//! - [`catalog`] - Product and pricing file loading
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use aurum_core::{CartItemInput, Customizations, Money};
//! use aurum_store::{Collection, MemoryStorage, ShopStore};
//!
//! let store = ShopStore::new(MemoryStorage::new());
//! store.subscribe(Collection::Cart, || println!("cart changed"));
//!
//! let specs = Customizations::new("Gold", "18K", "None");
//! store.add_to_cart(CartItemInput::new("R1", 1, specs.clone(), Money::from_rupees(5000)));
//! store.add_to_cart(CartItemInput::new("R1", 2, specs, Money::from_rupees(5000)));
//!
//! assert_eq!(store.get_cart().len(), 1);
//! assert_eq!(store.cart_count(), 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{FileStorage, MemoryStorage, StorageBackend};
pub use catalog::{load_catalog, load_pricing};
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use events::{Collection, Listener, SubscriptionId};
pub use store::{ShopStore, StorageKeys};

//! # aurum-core: Pure Domain Logic for the Aurum Storefront
//!
//! This crate contains the storefront's domain rules as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Aurum Storefront Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront pages / aurum-cli                    │   │
//! │  │    Listing ──► Detail ──► Cart ──► Wishlist                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               aurum-store (Cart/Wishlist Store)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ aurum-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │    key    │  │  pricing  │  │  catalog  │  │   │
//! │  │   │ CartItem  │  │  ItemKey  │  │ Multiplier│  │  Listing  │  │   │
//! │  │   │ Wishlist  │  │  item_key │  │  resolve  │  │   Query   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CartItem, WishlistItem, Customizations, Product)
//! - [`key`] - Composite item keys
//! - [`money`] - Money type with integer arithmetic (paise, no floating point)
//! - [`pricing`] - Metal/purity/stone multiplier tables
//! - [`catalog`] - Product listing filters and sorting
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use aurum_core::{item_key, Customizations};
//!
//! let specs = Customizations::new("Gold", "18K", "None");
//! let key = item_key("R1", &specs);
//! assert_eq!(key.as_str(), "R1-Gold-18K-None");
//! ```

pub mod catalog;
pub mod error;
pub mod key;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

pub use catalog::{CartLine, CartSummary, Catalog, ListingQuery, PriceRange, SortOrder};
pub use error::{CoreError, CoreResult, ValidationError};
pub use key::{item_key, ItemKey};
pub use money::Money;
pub use pricing::{Multiplier, PricingTable};
pub use types::*;

//! # Domain Types
//!
//! Core domain types shared by the store, the CLI and (via `ts-rs`) the web
//! storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    CartItem     │   │  WishlistItem   │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  cartItemId     │   │  wishlistItemId │   │  id             │       │
//! │  │  productId      │   │  productId      │   │  name, images   │       │
//! │  │  customizations │   │  customizations │   │  price (base)   │       │
//! │  │  finalPrice     │   │  finalPrice     │   │  defaultSpecs   │       │
//! │  │  quantity ≥ 1   │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │                 ┌─────────────────────────────┐                         │
//! │                 │       Customizations        │                         │
//! │                 │  metal · purity · stone     │                         │
//! │                 └─────────────────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `finalPrice` is resolved upstream (base price × multipliers) and frozen on
//! the entry when it is first inserted. The store never recomputes it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::key::{item_key, ItemKey};
use crate::money::Money;

// =============================================================================
// Customizations
// =============================================================================

/// User-selected attributes that affect both price and identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customizations {
    pub metal: String,
    pub purity: String,
    pub stone: String,
}

impl Customizations {
    pub fn new(
        metal: impl Into<String>,
        purity: impl Into<String>,
        stone: impl Into<String>,
    ) -> Self {
        Customizations {
            metal: metal.into(),
            purity: purity.into(),
            stone: stone.into(),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// What a page hands the store when the shopper clicks "Add to cart".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItemInput {
    pub product_id: String,
    pub quantity: i64,
    pub customizations: Customizations,
    /// Unit price already resolved against the pricing table.
    pub final_price: Money,
}

impl CartItemInput {
    pub fn new(
        product_id: impl Into<String>,
        quantity: i64,
        customizations: Customizations,
        final_price: Money,
    ) -> Self {
        CartItemInput {
            product_id: product_id.into(),
            quantity,
            customizations,
            final_price,
        }
    }

    /// The composite key this input merges under.
    pub fn key(&self) -> ItemKey {
        item_key(&self.product_id, &self.customizations)
    }
}

/// A persisted cart line.
///
/// ## Invariants
/// - `cart_item_id` is unique within the cart
/// - `quantity` ≥ 1 (an update to 0 or below removes the line instead)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    pub cart_item_id: ItemKey,
    pub product_id: String,
    pub quantity: i64,
    pub customizations: Customizations,
    /// Unit price frozen at first insert.
    pub final_price: Money,
    /// When the line was first added. Older data without it loads as "now".
    #[serde(default = "Utc::now")]
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Builds a new cart line from an input, deriving its key.
    pub fn from_input(input: CartItemInput, added_at: DateTime<Utc>) -> Self {
        CartItem {
            cart_item_id: input.key(),
            product_id: input.product_id,
            quantity: input.quantity,
            customizations: input.customizations,
            final_price: input.final_price,
            added_at,
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.final_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Wishlist
// =============================================================================

/// What a page hands the store when the shopper taps the heart icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WishlistItemInput {
    pub product_id: String,
    pub customizations: Customizations,
    pub final_price: Money,
}

impl WishlistItemInput {
    pub fn new(
        product_id: impl Into<String>,
        customizations: Customizations,
        final_price: Money,
    ) -> Self {
        WishlistItemInput {
            product_id: product_id.into(),
            customizations,
            final_price,
        }
    }

    pub fn key(&self) -> ItemKey {
        item_key(&self.product_id, &self.customizations)
    }
}

/// A persisted wishlist entry. Presence is the only state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WishlistItem {
    pub wishlist_item_id: ItemKey,
    pub product_id: String,
    pub customizations: Customizations,
    pub final_price: Money,
}

impl From<WishlistItemInput> for WishlistItem {
    fn from(input: WishlistItemInput) -> Self {
        WishlistItem {
            wishlist_item_id: input.key(),
            product_id: input.product_id,
            customizations: input.customizations,
            final_price: input.final_price,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog record, read from the static product file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Base price in rupees, before customization multipliers.
    pub price: Money,
    /// The configuration shown on listing cards.
    pub default_specs: Customizations,
}

impl Product {
    /// The wishlist key of this product in its default configuration.
    ///
    /// Listing cards use it to decide whether the heart icon is filled.
    pub fn default_wishlist_key(&self) -> ItemKey {
        item_key(&self.id, &self.default_specs)
    }

    /// Wishlist input for the default configuration at base price.
    pub fn default_wishlist_input(&self) -> WishlistItemInput {
        WishlistItemInput::new(self.id.clone(), self.default_specs.clone(), self.price)
    }

    /// First image, used as the card thumbnail.
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

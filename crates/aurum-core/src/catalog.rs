//! # Catalog
//!
//! Read-only product catalog plus the listing and cart-page queries that run
//! against it.
//!
//! ## Listing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products.json ──► Catalog                                              │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │  ListingQuery { price_ranges: ["0-25000"], metals: ["Gold"], sort }     │
//! │                      │                                                  │
//! │         any price range matches  AND  any metal matches                 │
//! │         (an empty filter set matches everything)                        │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │              stable sort by price (or catalog order)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;
use crate::types::{CartItem, Product};

// =============================================================================
// Catalog
// =============================================================================

/// All products, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// Parses a catalog from the JSON array in `products.json`.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Like [`Catalog::find`] but with a typed error for callers that need one.
    pub fn require(&self, id: &str) -> Result<&Product, CoreError> {
        self.find(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// Applies listing filters and sorting.
    pub fn query(&self, query: &ListingQuery) -> Vec<&Product> {
        let mut matches: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| query.matches(p))
            .collect();

        match query.sort {
            SortOrder::Featured => {}
            SortOrder::PriceAsc => matches.sort_by_key(|p| p.price),
            SortOrder::PriceDesc => matches.sort_by(|a, b| b.price.cmp(&a.price)),
        }

        matches
    }

    /// Joins cart lines to their products and totals them.
    ///
    /// Lines whose product is no longer in the catalog are left out of the
    /// summary (they stay in the stored cart).
    pub fn summarize(&self, cart: &[CartItem]) -> CartSummary {
        let lines: Vec<CartLine> = cart
            .iter()
            .filter_map(|item| {
                let Some(product) = self.find(&item.product_id) else {
                    debug!(product_id = %item.product_id, "Cart line has no catalog product, skipping");
                    return None;
                };
                Some(CartLine {
                    item: item.clone(),
                    product_name: product.name.clone(),
                    thumbnail: product.thumbnail().map(str::to_string),
                    line_total: item.line_total(),
                })
            })
            .collect();

        let subtotal: Money = lines.iter().map(|l| l.line_total).sum();
        let shipping = Money::zero();

        CartSummary {
            item_count: lines
                .iter()
                .fold(0i64, |n, l| n.saturating_add(l.item.quantity)),
            subtotal,
            shipping,
            total: subtotal + shipping,
            skipped: cart.len() - lines.len(),
            lines,
        }
    }
}

// =============================================================================
// Listing Query
// =============================================================================

/// An inclusive price band in whole rupees. `max: None` is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Money,
    pub max: Option<Money>,
}

impl PriceRange {
    pub fn contains(&self, price: Money) -> bool {
        price >= self.min && self.max.map_or(true, |max| price <= max)
    }
}

/// Parses the listing filter format: `"10000-25000"` or `"50000-"`.
///
/// A zero or empty upper bound means "no upper bound", as on the listing page.
impl FromStr for PriceRange {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidPriceRange(s.to_string());

        let (min, max) = s.trim().split_once('-').ok_or_else(invalid)?;
        let min: i64 = min.trim().parse().map_err(|_| invalid())?;
        let max = match max.trim() {
            "" => None,
            raw => match raw.parse::<i64>().map_err(|_| invalid())? {
                0 => None,
                value => Some(Money::from_rupees(value)),
            },
        };

        if min < 0 {
            return Err(invalid());
        }

        Ok(PriceRange {
            min: Money::from_rupees(min),
            max,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "featured" | "default" | "" => Ok(SortOrder::Featured),
            "price-asc" => Ok(SortOrder::PriceAsc),
            "price-desc" => Ok(SortOrder::PriceDesc),
            _ => Err(format!(
                "Unknown sort order '{s}'. Use featured, price-asc or price-desc"
            )),
        }
    }
}

/// Listing filters, as selected by the shopper.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingQuery {
    pub price_ranges: Vec<PriceRange>,
    pub metals: Vec<String>,
    pub sort: SortOrder,
}

impl ListingQuery {
    pub fn matches(&self, product: &Product) -> bool {
        let price_ok = self.price_ranges.is_empty()
            || self.price_ranges.iter().any(|r| r.contains(product.price));
        let metal_ok = self.metals.is_empty()
            || self
                .metals
                .iter()
                .any(|m| m.eq_ignore_ascii_case(&product.default_specs.metal));
        price_ok && metal_ok
    }
}

// =============================================================================
// Cart Summary
// =============================================================================

/// A cart line joined with its catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub item: CartItem,
    pub product_name: String,
    pub thumbnail: Option<String>,
    pub line_total: Money,
}

/// The cart page's order summary.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    /// Sum of quantities across displayed lines.
    pub item_count: i64,
    pub subtotal: Money,
    /// Always free.
    pub shipping: Money,
    pub total: Money,
    /// Stored lines with no matching product.
    pub skipped: usize,
}

impl CartSummary {
    /// Checkout is disabled on an empty (zero-value) order.
    pub fn can_checkout(&self) -> bool {
        !self.total.is_zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

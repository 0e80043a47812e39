//! # Composite Item Keys
//!
//! A cart line or wishlist entry is identified by its product id *and* the
//! customization it was configured with. Two entries with the same product
//! and the same metal/purity/stone are the same logical item.
//!
//! ## Encoding
//! ```text
//! productId ─┐
//! metal ─────┼─► escape('%', '-', controls) ─► join with '-'
//! purity ────┤
//! stone ─────┘
//!
//! ("R1", Gold, 18K, None)           → "R1-Gold-18K-None"
//! ("BS-001", Gold, 18K, SI-IJ)      → "BS%2D001-Gold-18K-SI%2DIJ"
//! ```
//!
//! Ordinary option values produce the same key as a plain hyphen join.
//! Values that themselves contain a hyphen are escaped, so
//! `("A-B", "C", ..)` and `("A", "B-C", ..)` can no longer collide.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::types::Customizations;

/// Characters escaped inside a key segment.
const SEGMENT: &AsciiSet = &CONTROLS.add(b'%').add(b'-');

const SEPARATOR: char = '-';

/// The derived identity of a cart line or wishlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemKey(String);

impl ItemKey {
    /// Wraps an existing key string (e.g. one read back from a page).
    pub fn from_raw(raw: impl Into<String>) -> Self {
        ItemKey(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the key back into `(product_id, customizations)`.
    ///
    /// Returns `None` when the key does not have exactly four segments or a
    /// segment is not valid UTF-8 after unescaping.
    pub fn decode(&self) -> Option<(String, Customizations)> {
        let mut parts = self.0.split(SEPARATOR).map(|segment| {
            percent_decode_str(segment)
                .decode_utf8()
                .ok()
                .map(|s| s.into_owned())
        });

        let product_id = parts.next()??;
        let metal = parts.next()??;
        let purity = parts.next()??;
        let stone = parts.next()??;
        if parts.next().is_some() {
            return None;
        }

        Some((product_id, Customizations::new(metal, purity, stone)))
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl AsRef<str> for ItemKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ItemKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ItemKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Derives the composite key for a product configured with `customizations`.
///
/// ## Example
/// ```rust
/// use aurum_core::{item_key, Customizations};
///
/// let key = item_key("E2", &Customizations::new("Platinum", "22K", "Diamond"));
/// assert_eq!(key.as_str(), "E2-Platinum-22K-Diamond");
/// ```
pub fn item_key(product_id: &str, customizations: &Customizations) -> ItemKey {
    let segments = [
        product_id,
        customizations.metal.as_str(),
        customizations.purity.as_str(),
        customizations.stone.as_str(),
    ];

    let mut key = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            key.push(SEPARATOR);
        }
        key.extend(utf8_percent_encode(segment, SEGMENT));
    }

    ItemKey(key)
}

// =============================================================================
// Unit Tests
// =============================================================================

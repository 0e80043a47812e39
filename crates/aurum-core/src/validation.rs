//! # Validation Module
//!
//! Input validation for cart and wishlist mutations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Page / CLI argument parsing                                  │
//! │  └── Types and required flags                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Field rules checked before the store touches storage              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store                                                        │
//! │  └── Merge-on-add (checked sum), quantity ≤ 0 removes                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use aurum_core::validation::{validate_product_id, validate_quantity};
//!
//! assert!(validate_product_id("BS001R").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CartItemInput, Customizations, WishlistItemInput};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product identifier. Any non-blank string is accepted.
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "productId".to_string(),
        });
    }
    Ok(())
}

/// Validates that metal, purity and stone are all present.
pub fn validate_customizations(c: &Customizations) -> ValidationResult<()> {
    for (field, value) in [("metal", &c.metal), ("purity", &c.purity), ("stone", &c.stone)] {
        if value.trim().is_empty() {
            return Err(ValidationError::Required {
                field: field.to_string(),
            });
        }
    }
    Ok(())
}

/// Validates a quantity being added. Must be positive; there is no upper bound.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Sums an existing line quantity and an added quantity.
///
/// Overflow is the only failure.
///
/// ## Example
/// ```rust
/// use aurum_core::validation::merge_quantity;
///
/// assert_eq!(merge_quantity(600, 600).unwrap(), 1200);
/// assert!(merge_quantity(i64::MAX, 1).is_err());
/// ```
pub fn merge_quantity(existing: i64, added: i64) -> ValidationResult<i64> {
    existing
        .checked_add(added)
        .ok_or_else(|| ValidationError::Overflow {
            field: "quantity".to_string(),
        })
}

/// Validates a unit price. Zero is allowed.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "finalPrice".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Input Validators
// =============================================================================

/// Validates everything `add_to_cart` receives.
pub fn validate_cart_input(input: &CartItemInput) -> ValidationResult<()> {
    validate_product_id(&input.product_id)?;
    validate_customizations(&input.customizations)?;
    validate_quantity(input.quantity)?;
    validate_price(input.final_price)
}

/// Validates everything `toggle_wishlist_item` receives.
pub fn validate_wishlist_input(input: &WishlistItemInput) -> ValidationResult<()> {
    validate_product_id(&input.product_id)?;
    validate_customizations(&input.customizations)?;
    validate_price(input.final_price)
}

// =============================================================================
// Unit Tests
// =============================================================================

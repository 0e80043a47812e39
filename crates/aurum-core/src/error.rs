//! # Error Types
//!
//! Domain-specific error types for aurum-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  aurum-core errors (this file)                                          │
//! │  ├── CoreError        - Domain errors (pricing, catalog)                │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  aurum-store errors (separate crate)                                    │
//! │  └── StoreError       - Storage, config and file loading failures      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → CLI (anyhow)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Store reads never raise: corrupt persisted data is recovered as an empty
//! collection. These types cover the paths that do surface errors.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A customization option has no entry in the pricing table.
    ///
    /// ## When This Occurs
    /// - Pricing file lacks a metal/purity/stone the catalog offers
    /// - A stale cart line references a retired option
    #[error("No {dimension} multiplier for option '{option}'")]
    UnknownOption { dimension: String, option: String },

    /// A listing price range could not be parsed.
    #[error("Invalid price range '{0}': expected 'min-max' or 'min-'")]
    InvalidPriceRange(String),

    /// Multiplier value is negative or not finite.
    #[error("Invalid multiplier {0}: must be a finite, non-negative factor")]
    InvalidMultiplier(f64),

    /// A rupee amount in a data file is not a finite number of paise.
    #[error("Invalid amount {0}: must be a finite rupee value")]
    InvalidAmount(f64),

    /// A resolved price does not fit in `Money`.
    ///
    /// ## When This Occurs
    /// - A corrupt pricing file with enormous multipliers
    #[error("Price overflow resolving {0} with the selected options")]
    PriceOverflow(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before a mutation touches storage.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value would not fit in its integer type.
    #[error("{field} is too large")]
    Overflow { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A ring at ₹48,250 with a 1.15× metal and 1.05× purity multiplier:      │
//! │    48250 * 1.15 * 1.05 = 58261.87499999999  ❌                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    4825000 paise × 11500 bps × 10500 bps, rounded once at the end       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use aurum_core::money::Money;
//!
//! let price = Money::from_rupees(5000);
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.rupees(), 15000);
//! assert_eq!(line.to_string(), "₹15,000");
//! ```

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paise (1/100 rupee).
///
/// Reads and writes as decimal rupees, the way the storefront's data files
/// hold prices: `"finalPrice": 5000` is ₹5,000 and `58261.88` keeps its
/// paise. Fractions finer than a paisa are rounded half away from zero.
///
/// Arithmetic saturates at the `i64` bounds instead of panicking, so a
/// hostile quantity in stored data cannot crash a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize, TS)]
#[serde(try_from = "f64")]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Creates a Money value from paise.
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use aurum_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(5000).paise(), 500_000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees.saturating_mul(100))
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart line: Solitaire Ring ₹58,262 × 2
    ///      │
    ///      ▼
    /// multiply_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line total: ₹1,16,524
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Formats the amount with a currency symbol and Indian digit grouping.
    ///
    /// The last three digits form one group and every two digits after
    /// that form another (`12,34,567`). The paise part is only shown
    /// when non-zero.
    ///
    /// ## Example
    /// ```rust
    /// use aurum_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(1_234_567).format_with("₹"), "₹12,34,567");
    /// assert_eq!(Money::from_paise(99_950).format_with("Rs "), "Rs 999.50");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let whole = group_indian(self.rupees().unsigned_abs());
        if self.paise_part() == 0 {
            format!("{sign}{symbol}{whole}")
        } else {
            format!("{sign}{symbol}{whole}.{:02}", self.paise_part())
        }
    }
}

/// Inserts Indian-style thousands separators into a whole number.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

// =============================================================================
// Serialization
// =============================================================================

impl TryFrom<f64> for Money {
    type Error = CoreError;

    fn try_from(rupees: f64) -> Result<Self, Self::Error> {
        let paise = (rupees * 100.0).round();
        // NaN fails both comparisons.
        if !(paise >= i64::MIN as f64 && paise < i64::MAX as f64) {
            return Err(CoreError::InvalidAmount(rupees));
        }
        Ok(Money(paise as i64))
    }
}

/// Whole rupees are written as integers, anything else as a decimal.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.rupees())
        } else {
            serializer.serialize_f64(self.0 as f64 / 100.0)
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Rupee display with Indian grouping, matching the storefront pages.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format_with("₹"))
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

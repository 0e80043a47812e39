//! # Pricing
//!
//! Resolves the unit price of a customized piece from its catalog base price
//! and the market pricing table.
//!
//! ## Price Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  base price (catalog)          ₹48,250                                  │
//! │        × metal["Gold"]          1.00                                    │
//! │        × purity["22K"]          1.15                                    │
//! │        × stone["Diamond"]       1.05                                    │
//! │  ───────────────────────────────────────                                │
//! │  finalPrice                    ₹58,261.88                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Multipliers are stored in basis points (`10_000` = 1.0×). The product is
//! computed in checked `i128` and rounded half-up once, at the end.
//!
//! ## Pricing File
//! ```json
//! {
//!   "metal":  { "Gold": 1.0, "Platinum": 1.6 },
//!   "purity": { "18K": 1.0, "22K": 1.15 },
//!   "stone":  { "None": 1.0, "Diamond": 1.05 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Customizations;

/// Basis points in a 1.0× multiplier.
const BPS_SCALE: i128 = 10_000;

// =============================================================================
// Multiplier
// =============================================================================

/// A price multiplier in basis points.
///
/// Reads and writes as a decimal factor (`1.15`) in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Multiplier(u32);

impl Multiplier {
    /// No adjustment.
    pub const ONE: Multiplier = Multiplier(10_000);

    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Multiplier(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the multiplier as a factor (for display only).
    #[inline]
    pub fn factor(&self) -> f64 {
        f64::from(self.0) / 10_000.0
    }
}

impl TryFrom<f64> for Multiplier {
    type Error = CoreError;

    fn try_from(factor: f64) -> Result<Self, Self::Error> {
        let bps = (factor * 10_000.0).round();
        if !bps.is_finite() || bps < 0.0 || bps > f64::from(u32::MAX) {
            return Err(CoreError::InvalidMultiplier(factor));
        }
        Ok(Multiplier(bps as u32))
    }
}

impl From<Multiplier> for f64 {
    fn from(m: Multiplier) -> Self {
        m.factor()
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Multiplier::ONE
    }
}

// =============================================================================
// Pricing Table
// =============================================================================

/// Multiplier lookup tables keyed by option name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingTable {
    #[serde(default)]
    pub metal: BTreeMap<String, Multiplier>,
    #[serde(default)]
    pub purity: BTreeMap<String, Multiplier>,
    #[serde(default)]
    pub stone: BTreeMap<String, Multiplier>,
}

impl PricingTable {
    /// Parses a pricing table from JSON text.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Resolves the final unit price, failing on any unknown option.
    ///
    /// ## Example
    /// ```rust
    /// use aurum_core::{Customizations, Money, PricingTable};
    ///
    /// let table = PricingTable::from_json(
    ///     r#"{"metal": {"Gold": 1.0}, "purity": {"22K": 1.15}, "stone": {"None": 1.0}}"#,
    /// ).unwrap();
    /// let price = table
    ///     .resolve(Money::from_rupees(10_000), &Customizations::new("Gold", "22K", "None"))
    ///     .unwrap();
    /// assert_eq!(price, Money::from_rupees(11_500));
    /// ```
    pub fn resolve(&self, base: Money, customizations: &Customizations) -> CoreResult<Money> {
        let metal = lookup(&self.metal, "metal", &customizations.metal)?;
        let purity = lookup(&self.purity, "purity", &customizations.purity)?;
        let stone = lookup(&self.stone, "stone", &customizations.stone)?;
        apply(base, [metal, purity, stone])
            .ok_or_else(|| CoreError::PriceOverflow(base.to_string()))
    }

    /// Resolves the final unit price, treating unknown options as 1.0×.
    ///
    /// A result beyond the `Money` range saturates.
    pub fn resolve_or_base(&self, base: Money, customizations: &Customizations) -> Money {
        let pick = |table: &BTreeMap<String, Multiplier>, dimension: &str, option: &str| {
            table.get(option).copied().unwrap_or_else(|| {
                debug!(dimension, option, "No multiplier for option, using 1.0x");
                Multiplier::ONE
            })
        };

        let multipliers = [
            pick(&self.metal, "metal", &customizations.metal),
            pick(&self.purity, "purity", &customizations.purity),
            pick(&self.stone, "stone", &customizations.stone),
        ];
        apply(base, multipliers).unwrap_or_else(|| {
            debug!(%base, "Resolved price out of range, saturating");
            if base.is_negative() {
                Money::from_paise(i64::MIN)
            } else {
                Money::from_paise(i64::MAX)
            }
        })
    }

    /// Option names offered for each dimension, in sorted order.
    pub fn options(&self) -> (Vec<&str>, Vec<&str>, Vec<&str>) {
        (
            option_names(&self.metal),
            option_names(&self.purity),
            option_names(&self.stone),
        )
    }
}

fn option_names(table: &BTreeMap<String, Multiplier>) -> Vec<&str> {
    table.keys().map(String::as_str).collect()
}

fn lookup(
    table: &BTreeMap<String, Multiplier>,
    dimension: &str,
    option: &str,
) -> CoreResult<Multiplier> {
    table
        .get(option)
        .copied()
        .ok_or_else(|| CoreError::UnknownOption {
            dimension: dimension.to_string(),
            option: option.to_string(),
        })
}

/// base × m1 × m2 × m3, rounded half away from zero.
///
/// `None` if the product overflows `i128` or the result does not fit in `Money`.
fn apply(base: Money, multipliers: [Multiplier; 3]) -> Option<Money> {
    let mut numerator = i128::from(base.paise());
    let mut denominator: i128 = 1;
    for m in multipliers {
        numerator = numerator.checked_mul(i128::from(m.bps()))?;
        denominator *= BPS_SCALE;
    }

    let half = denominator / 2;
    let rounded = if numerator >= 0 {
        numerator.checked_add(half)? / denominator
    } else {
        numerator.checked_sub(half)? / denominator
    };

    i64::try_from(rounded).ok().map(Money::from_paise)
}

// =============================================================================
// Unit Tests
// =============================================================================

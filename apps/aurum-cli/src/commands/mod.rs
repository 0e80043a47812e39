//! # Commands
//!
//! One module per top-level subcommand.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (shared argument types, output helpers)
//! ├── cart.rs      ◄─── cart list | add | remove | set-qty | clear | summary
//! ├── wishlist.rs  ◄─── wishlist list | toggle | contains
//! ├── catalog.rs   ◄─── catalog list
//! └── config.rs    ◄─── config show
//! ```
//!
//! Handlers write to the `out` they are given so tests can capture it.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod wishlist;

use clap::Args;
use serde::Serialize;
use std::io::Write;

use aurum_core::{Customizations, Money, PricingTable, Product};

/// `--metal / --purity / --stone`, each defaulting to the product's default configuration.
#[derive(Debug, Clone, Default, Args)]
pub struct CustomizationArgs {
    /// Metal (e.g. Gold, Platinum)
    #[arg(long)]
    pub metal: Option<String>,
    /// Purity (e.g. 18K, 22K)
    #[arg(long)]
    pub purity: Option<String>,
    /// Stone (e.g. None, Diamond)
    #[arg(long)]
    pub stone: Option<String>,
}

impl CustomizationArgs {
    pub fn resolve(&self, product: &Product) -> Customizations {
        let defaults = &product.default_specs;
        Customizations {
            metal: self.metal.clone().unwrap_or_else(|| defaults.metal.clone()),
            purity: self.purity.clone().unwrap_or_else(|| defaults.purity.clone()),
            stone: self.stone.clone().unwrap_or_else(|| defaults.stone.clone()),
        }
    }
}

/// Customizations and unit price for a product as the shopper configured it.
pub fn price_selection(
    product: &Product,
    options: &CustomizationArgs,
    pricing: &PricingTable,
) -> (Customizations, Money) {
    let customizations = options.resolve(product);
    let price = pricing.resolve_or_base(product.price, &customizations);
    (customizations, price)
}

pub fn print_json<T: Serialize>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

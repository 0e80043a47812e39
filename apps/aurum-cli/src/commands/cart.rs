//! # Cart Commands
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐   cart add    ┌──────────┐   cart summary  ┌──────────┐  │
//! │  │  Empty   │──────────────►│ In Cart  │────────────────►│ Checkout │  │
//! │  │  Cart    │               │          │                 │  (page)  │  │
//! │  └──────────┘               └──────────┘                 └──────────┘  │
//! │       ▲                       │      ▲                                  │
//! │       │        cart set-qty 0 │      │ cart add (same key: qty += n)    │
//! │       │        cart remove    ▼      │ cart set-qty n                   │
//! │       └─────────────────── cart clear                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::bail;
use clap::Subcommand;
use std::io::Write;
use tracing::debug;

use aurum_core::validation::validate_cart_input;
use aurum_core::CartItemInput;

use super::{price_selection, print_json, CustomizationArgs};
use crate::state::AppState;

#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Show cart lines in the order they were added
    List,
    /// Add a product, merging with an identical line
    Add {
        /// Product id from the catalog
        product_id: String,
        /// Quantity to add
        #[arg(long, short, default_value_t = 1)]
        qty: i64,
        #[command(flatten)]
        options: CustomizationArgs,
    },
    /// Remove a line by its cart item id
    Remove { cart_item_id: String },
    /// Set a line's quantity (0 or less removes it)
    SetQty {
        cart_item_id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// Order summary joined against the catalog
    Summary,
}

pub fn run(state: &AppState, command: CartCommands, out: &mut impl Write) -> anyhow::Result<()> {
    debug!(?command, "cart command");
    match command {
        CartCommands::List => list(state, out),
        CartCommands::Add {
            product_id,
            qty,
            options,
        } => add(state, &product_id, qty, &options, out),
        CartCommands::Remove { cart_item_id } => remove(state, &cart_item_id, out),
        CartCommands::SetQty {
            cart_item_id,
            quantity,
        } => set_quantity(state, &cart_item_id, quantity, out),
        CartCommands::Clear => {
            state.store.clear_cart();
            report(state, "Cart cleared", out)
        }
        CartCommands::Summary => summary(state, out),
    }
}

fn list(state: &AppState, out: &mut impl Write) -> anyhow::Result<()> {
    let cart = state.store.get_cart();
    if state.json {
        return print_json(out, &cart);
    }

    if cart.is_empty() {
        writeln!(out, "Your cart is empty")?;
        return Ok(());
    }

    for item in &cart {
        writeln!(
            out,
            "{:<32} x{:<4} {:>14} {:>14}",
            item.cart_item_id,
            item.quantity,
            state.money(item.final_price),
            state.money(item.line_total()),
        )?;
    }
    Ok(())
}

fn add(
    state: &AppState,
    product_id: &str,
    qty: i64,
    options: &CustomizationArgs,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let catalog = state.catalog()?;
    let product = catalog.require(product_id)?;
    let (customizations, price) = price_selection(product, options, &state.pricing()?);

    let input = CartItemInput::new(product_id, qty, customizations, price);
    validate_cart_input(&input)?;
    let key = input.key();

    state.store.add_to_cart(input);
    if !state.take_changed() {
        bail!("Cart was not updated for {key}");
    }

    report(state, &format!("Added {key} at {}", state.money(price)), out)
}

fn remove(state: &AppState, cart_item_id: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let present = state
        .store
        .get_cart()
        .iter()
        .any(|i| i.cart_item_id == cart_item_id);

    state.store.remove_from_cart(cart_item_id);

    let message = if present {
        format!("Removed {cart_item_id}")
    } else {
        format!("{cart_item_id} is not in the cart")
    };
    report(state, &message, out)
}

fn set_quantity(
    state: &AppState,
    cart_item_id: &str,
    quantity: i64,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    state.store.update_cart_quantity(cart_item_id, quantity);

    let message = if quantity > 0 {
        format!("Set {cart_item_id} to {quantity}")
    } else {
        format!("Removed {cart_item_id}")
    };
    report(state, &message, out)
}

fn summary(state: &AppState, out: &mut impl Write) -> anyhow::Result<()> {
    let catalog = state.catalog()?;
    let summary = state.store.cart_summary(&catalog);
    if state.json {
        return print_json(out, &summary);
    }

    if summary.lines.is_empty() {
        writeln!(out, "Your cart is empty")?;
        return Ok(());
    }

    for line in &summary.lines {
        writeln!(
            out,
            "{:<28} {:<22} x{:<4} {:>14}",
            line.product_name,
            format!(
                "{}/{}/{}",
                line.item.customizations.metal,
                line.item.customizations.purity,
                line.item.customizations.stone
            ),
            line.item.quantity,
            state.money(line.line_total),
        )?;
    }
    writeln!(out, "{}", "-".repeat(72))?;
    writeln!(out, "{:<56} {:>15}", "Subtotal", state.money(summary.subtotal))?;
    writeln!(out, "{:<56} {:>15}", "Shipping", "Free")?;
    writeln!(out, "{:<56} {:>15}", "Total", state.money(summary.total))?;
    if summary.skipped > 0 {
        writeln!(out, "({} line(s) no longer in the catalog)", summary.skipped)?;
    }
    Ok(())
}

fn report(state: &AppState, message: &str, out: &mut impl Write) -> anyhow::Result<()> {
    if state.json {
        return print_json(out, &serde_json::json!({ "message": message }));
    }
    writeln!(out, "{message}")?;
    writeln!(out, "{}", state.counters())?;
    Ok(())
}

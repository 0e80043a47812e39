//! # Wishlist Commands

use clap::Subcommand;
use std::io::Write;
use tracing::debug;

use aurum_core::validation::validate_wishlist_input;
use aurum_core::WishlistItemInput;

use super::{price_selection, print_json, CustomizationArgs};
use crate::state::AppState;

#[derive(Debug, Subcommand)]
pub enum WishlistCommands {
    /// Show saved items
    List,
    /// Save a product, or unsave it if already saved
    Toggle {
        product_id: String,
        #[command(flatten)]
        options: CustomizationArgs,
    },
    /// Exit status 0 if the item is saved, 1 otherwise
    Contains { wishlist_item_id: String },
}

pub fn run(
    state: &AppState,
    command: WishlistCommands,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    debug!(?command, "wishlist command");
    match command {
        WishlistCommands::List => {
            let items = state.store.get_wishlist();
            if state.json {
                print_json(out, &items)?;
            } else if items.is_empty() {
                writeln!(out, "Your wishlist is empty")?;
            } else {
                for item in &items {
                    writeln!(
                        out,
                        "{:<32} {:>14}",
                        item.wishlist_item_id,
                        state.money(item.final_price)
                    )?;
                }
            }
            Ok(true)
        }
        WishlistCommands::Toggle {
            product_id,
            options,
        } => {
            let catalog = state.catalog()?;
            let product = catalog.require(&product_id)?;
            let (customizations, price) = price_selection(product, &options, &state.pricing()?);

            let input = WishlistItemInput::new(product_id, customizations, price);
            validate_wishlist_input(&input)?;
            let key = input.key();

            state.store.toggle_wishlist_item(input);
            state.take_changed();

            let saved = state.store.is_item_in_wishlist(key.as_str());
            if state.json {
                print_json(out, &serde_json::json!({ "wishlistItemId": key, "saved": saved }))?;
            } else {
                let verb = if saved { "Saved" } else { "Removed" };
                writeln!(out, "{verb} {key}")?;
                writeln!(out, "{}", state.counters())?;
            }
            Ok(true)
        }
        WishlistCommands::Contains { wishlist_item_id } => {
            let saved = state.store.is_item_in_wishlist(&wishlist_item_id);
            if state.json {
                print_json(out, &serde_json::json!({ "saved": saved }))?;
            } else {
                writeln!(out, "{}", if saved { "yes" } else { "no" })?;
            }
            Ok(saved)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{app, output};

    fn toggle(product_id: &str) -> WishlistCommands {
        WishlistCommands::Toggle {
            product_id: product_id.to_string(),
            options: CustomizationArgs::default(),
        }
    }

    #[test]
    fn test_toggle_three_times() {
        let (_dir, state) = app(false);
        let mut out = Vec::new();

        run(&state, toggle("E2"), &mut out).unwrap();
        run(&state, toggle("E2"), &mut out).unwrap();
        run(&state, toggle("E2"), &mut out).unwrap();

        let text = output(out);
        assert_eq!(text.matches("Saved E2-Platinum-22K-Diamond").count(), 2);
        assert_eq!(text.matches("Removed E2-Platinum-22K-Diamond").count(), 1);
        assert_eq!(state.store.wishlist_count(), 1);
    }

    #[test]
    fn test_contains_reports_membership() {
        let (_dir, state) = app(false);
        let contains = || WishlistCommands::Contains {
            wishlist_item_id: "R1-Gold-18K-None".to_string(),
        };

        assert!(!run(&state, contains(), &mut Vec::new()).unwrap());
        run(&state, toggle("R1"), &mut Vec::new()).unwrap();
        assert!(run(&state, contains(), &mut Vec::new()).unwrap());
    }
}

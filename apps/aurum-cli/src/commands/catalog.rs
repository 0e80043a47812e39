//! # Catalog Commands
//!
//! The listing page: filters, sort, and a filled heart for products whose
//! default configuration is on the wishlist.

use clap::Subcommand;
use serde::Serialize;
use std::io::Write;

use aurum_core::{ListingQuery, PriceRange, Product, SortOrder};

use super::print_json;
use crate::state::AppState;

#[derive(Debug, Subcommand)]
pub enum CatalogCommands {
    /// List products
    List {
        /// Price band in rupees, "min-max" or "min-" (repeatable)
        #[arg(long = "price")]
        price_ranges: Vec<PriceRange>,
        /// Metal of the default configuration (repeatable)
        #[arg(long = "metal")]
        metals: Vec<String>,
        /// featured, price-asc or price-desc
        #[arg(long, default_value = "featured")]
        sort: SortOrder,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListingCard<'a> {
    #[serde(flatten)]
    product: &'a Product,
    in_wishlist: bool,
}

pub fn run(state: &AppState, command: CatalogCommands, out: &mut impl Write) -> anyhow::Result<()> {
    let CatalogCommands::List {
        price_ranges,
        metals,
        sort,
    } = command;

    let catalog = state.catalog()?;
    let query = ListingQuery {
        price_ranges,
        metals,
        sort,
    };

    let cards: Vec<ListingCard<'_>> = catalog
        .query(&query)
        .into_iter()
        .map(|product| ListingCard {
            product,
            in_wishlist: state
                .store
                .is_item_in_wishlist(product.default_wishlist_key().as_str()),
        })
        .collect();

    if state.json {
        return print_json(out, &cards);
    }

    if cards.is_empty() {
        writeln!(out, "No products match the selected filters")?;
        return Ok(());
    }

    for card in &cards {
        writeln!(
            out,
            "{} {:<10} {:<32} {:<10} {:>14}",
            if card.in_wishlist { "♥" } else { "♡" },
            card.product.id,
            card.product.name,
            card.product.default_specs.metal,
            state.money(card.product.price),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{app, output};

    fn list(sort: SortOrder) -> CatalogCommands {
        CatalogCommands::List {
            price_ranges: vec![],
            metals: vec![],
            sort,
        }
    }

    #[test]
    fn test_sorted_listing() {
        let (_dir, state) = app(false);
        let mut out = Vec::new();
        run(&state, list(SortOrder::PriceDesc), &mut out).unwrap();

        let text = output(out);
        let e2 = text.find("E2").unwrap();
        let r1 = text.find("R1").unwrap();
        assert!(e2 < r1);
    }

    #[test]
    fn test_heart_follows_default_wishlist_key() {
        let (_dir, state) = app(false);
        let catalog = state.catalog().unwrap();
        let product = catalog.find("R1").unwrap();
        state.store.toggle_wishlist_item(product.default_wishlist_input());

        let mut out = Vec::new();
        run(&state, list(SortOrder::Featured), &mut out).unwrap();
        let text = output(out);

        assert!(text.lines().any(|l| l.starts_with('♥') && l.contains("R1")));
        assert!(text.lines().any(|l| l.starts_with('♡') && l.contains("E2")));
    }

    #[test]
    fn test_filters_with_no_match() {
        let (_dir, state) = app(false);
        let mut out = Vec::new();
        let command = CatalogCommands::List {
            price_ranges: vec!["0-100".parse().unwrap()],
            metals: vec![],
            sort: SortOrder::Featured,
        };
        run(&state, command, &mut out).unwrap();
        assert!(output(out).contains("No products match"));
    }
}

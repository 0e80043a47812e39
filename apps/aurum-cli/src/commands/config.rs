//! # Config Commands

use clap::Subcommand;
use std::io::Write;

use super::print_json;
use crate::state::AppState;

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
}

pub fn run(state: &AppState, command: ConfigCommands, out: &mut impl Write) -> anyhow::Result<()> {
    let ConfigCommands::Show = command;
    let config = &state.config;

    if state.json {
        return print_json(out, config);
    }

    writeln!(out, "data_dir        = {}", config.data_dir.display())?;
    writeln!(out, "cart_key        = {}", config.cart_key)?;
    writeln!(out, "wishlist_key    = {}", config.wishlist_key)?;
    writeln!(out, "catalog_path    = {}", config.catalog_path.display())?;
    writeln!(out, "pricing_path    = {}", config.pricing_path.display())?;
    writeln!(out, "currency_symbol = {}", config.currency_symbol)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{app, output};

    #[test]
    fn test_show_plain() {
        let (_dir, state) = app(false);
        let mut out = Vec::new();
        run(&state, ConfigCommands::Show, &mut out).unwrap();

        let text = output(out);
        assert!(text.contains("cart_key        = cart"));
        assert!(text.contains("currency_symbol = ₹"));
    }

    #[test]
    fn test_show_json() {
        let (_dir, state) = app(true);
        let mut out = Vec::new();
        run(&state, ConfigCommands::Show, &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["wishlist_key"], "wishlist");
    }
}

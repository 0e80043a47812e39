//! # Aurum CLI Library
//!
//! Command-line stand-in for the storefront pages. Parses arguments, opens
//! the store and dispatches to a command handler.
//!
//! ## Module Organization
//! ```text
//! aurum_cli/
//! ├── lib.rs          ◄─── You are here (argument types, setup & run)
//! ├── state.rs        ◄─── AppState: config, store, change flag
//! └── commands/
//!     ├── mod.rs      ◄─── Shared argument types and output helpers
//!     ├── cart.rs     ◄─── Cart manipulation and summary
//!     ├── wishlist.rs ◄─── Wishlist toggle and queries
//!     ├── catalog.rs  ◄─── Listing filters and sort
//!     └── config.rs   ◄─── Effective configuration
//! ```

pub mod commands;
pub mod state;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use aurum_store::StoreConfig;

use commands::cart::CartCommands;
use commands::catalog::CatalogCommands;
use commands::config::ConfigCommands;
use commands::wishlist::WishlistCommands;
use state::AppState;

#[derive(Debug, Parser)]
#[command(name = "aurum")]
#[command(about = "Aurum storefront cart and wishlist")]
pub struct Cli {
    /// Config file (defaults to aurum.toml in the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for cart and wishlist data
    #[arg(long, global = true, env = "AURUM_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Log store operations to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Shopping cart
    #[command(subcommand)]
    Cart(CartCommands),
    /// Saved items
    #[command(subcommand)]
    Wishlist(WishlistCommands),
    /// Product listing
    #[command(subcommand)]
    Catalog(CatalogCommands),
    /// Configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Runs one CLI invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging                                                  │
/// │     • tracing-subscriber with env filter, stderr only                   │
/// │     • Default: warn,aurum=info; --verbose raises aurum to debug         │
/// │                                                                         │
/// │  2. Load Configuration                                                  │
/// │     • defaults → aurum.toml → AURUM_* environment → --data-dir          │
/// │                                                                         │
/// │  3. Open State                                                          │
/// │     • ShopStore over <data_dir>/{cart,wishlist}.json                    │
/// │     • Listeners flag every cart / wishlist change                       │
/// │                                                                         │
/// │  4. Dispatch                                                            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// `wishlist contains` answers through the exit code.
pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    init_tracing(cli.verbose);

    let mut config = StoreConfig::load(cli.config)?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    info!(data_dir = %config.data_dir.display(), "Starting aurum");

    let state = AppState::open(config, cli.json)?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Cart(command) => commands::cart::run(&state, command, &mut out)?,
        Commands::Wishlist(command) => {
            if !commands::wishlist::run(&state, command, &mut out)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Catalog(command) => commands::catalog::run(&state, command, &mut out)?,
        Commands::Config(command) => commands::config::run(&state, command, &mut out)?,
    }

    Ok(ExitCode::SUCCESS)
}

/// Initializes the tracing subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,aurum=debug"
    } else {
        "warn,aurum=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

//! # Aurum CLI Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Parse arguments
//! 3. Load configuration (file, then environment)
//! 4. Open the file-backed store
//! 5. Run the command

use clap::Parser;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    // The actual setup is in lib.rs for testability
    aurum_cli::run(aurum_cli::Cli::parse())
}

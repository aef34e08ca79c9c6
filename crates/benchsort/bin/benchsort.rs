//! Benchsort binary entry point.
//!
//! This is a thin wrapper around the benchsort library that:
//! 1. Initializes logging
//! 2. Parses command-line arguments
//! 3. Runs the selected command, which validates its options first
//!
//! For library usage, see the benchsort crate documentation.

use anyhow::Result;
use benchsort::Cli;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::from_args();
    benchsort::commands::execute(&cli.command)?;

    Ok(())
}

//! Duplicate Detector CLI
//!
//! A command-line tool for finding duplicate movie copies in media libraries
//! and ranking them by quality.

use clap::Parser;
use dupe_detector::cli::{
    args::{Cli, Commands},
    commands::{cross, scan, score},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Run the appropriate command
    match cli.command {
        Commands::Scan { root, format } => {
            scan::scan_library(&root, &format).await?;
        }

        Commands::Cross { roots, mode, format } => {
            cross::cross_scan(&roots, &mode, &format).await?;
        }

        Commands::Score { name, size, format } => {
            score::score_name(&name, size, &format)?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("dupe_detector=debug")
    } else {
        EnvFilter::new("dupe_detector=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

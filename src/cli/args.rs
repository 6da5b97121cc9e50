//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Duplicate Detector - Find redundant movie copies in your libraries
#[derive(Parser, Debug)]
#[command(name = "dupe-detector")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan one library for movie folders holding duplicate video files
    Scan {
        /// Library root directory
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Match movie folders across several library roots
    Cross {
        /// Library root directories
        #[arg(value_name = "ROOTS", required = true, num_args = 1..)]
        roots: Vec<PathBuf>,

        /// Match mode: exact or fuzzy
        #[arg(short, long, default_value = "exact")]
        mode: String,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Score a file or folder name without scanning anything
    Score {
        /// The name to score
        #[arg(value_name = "NAME")]
        name: String,

        /// Size in bytes fed into the size factor
        #[arg(short, long, default_value_t = 0)]
        size: u64,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },
}

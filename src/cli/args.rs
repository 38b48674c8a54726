//! CLI argument definitions using clap
//!
//! Commands:
//! - libris init --config <path>
//! - libris seed --config <path>
//! - libris start --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// libris - a small book/author catalog HTTP API
#[derive(Parser, Debug)]
#[command(name = "libris")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the catalog schema in the configured database
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./libris.json")]
        config: PathBuf,
    },

    /// Load the demo catalog (creates the schema first if needed)
    Seed {
        /// Path to configuration file
        #[arg(long, default_value = "./libris.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./libris.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

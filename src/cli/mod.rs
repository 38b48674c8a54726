//! CLI module for libris
//!
//! Provides the command-line interface:
//! - init: create the database schema
//! - seed: load the demo catalog
//! - start: boot the HTTP server

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, seed, start};
pub use errors::{CliError, CliResult};

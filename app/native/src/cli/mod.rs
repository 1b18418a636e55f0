//! CLI module for Concertina.
//!
//! The CLI drives the tiler without a window server: layouts and whole
//! tiling passes run against in-memory windows, and the configuration can be
//! inspected the way the tiler sees it.

mod commands;
mod output;

use clap::Parser;
pub use commands::Cli;

use crate::error::ConcertinaError;

/// Runs the CLI.
///
/// Parses command-line arguments and executes the appropriate command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), ConcertinaError> {
    let cli = Cli::parse();
    cli.execute()
}

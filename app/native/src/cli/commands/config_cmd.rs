//! Config CLI commands.
//!
//! Commands for inspecting the configuration file.

use clap::Subcommand;
use colored::Colorize;

use super::Cli;
use crate::cli::output;
use crate::config::config_paths;
use crate::error::ConcertinaError;

/// Config inspection commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Show the path to the configuration file.
    ///
    /// Displays the paths searched for a configuration file, in priority
    /// order, and marks the one in use.
    Path,

    /// Print the effective configuration.
    ///
    /// Defaults are filled in and values are clamped the same way the tiler
    /// sees them.
    #[command(after_long_help = r#"Examples:
  concertina config show                          # Highlighted JSON
  concertina config show --json > effective.json  # Plain JSON"#)]
    Show {
        /// Print plain JSON without highlighting.
        #[arg(long, short = 'j')]
        json: bool,
    },
}

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or printed.
pub fn execute(cmd: &ConfigCommands, cli: &Cli) -> Result<(), ConcertinaError> {
    match cmd {
        ConfigCommands::Path => {
            show_config_path(cli);
            Ok(())
        }
        ConfigCommands::Show { json } => {
            let store = cli.load_config()?;
            let config = store.snapshot();
            if *json {
                println!("{}", serde_json::to_string_pretty(&*config)?);
                Ok(())
            } else {
                output::print_json(&*config)
            }
        }
    }
}

fn show_config_path(cli: &Cli) {
    if let Some(path) = &cli.config {
        let marker = if path.exists() { " (active)".green() } else { " (missing)".red() };
        println!("{}{marker}", path.display());
        return;
    }

    println!("Configuration file search paths (in priority order):\n");

    let mut found_config = false;
    for (i, path) in config_paths().iter().enumerate() {
        let exists = path.exists();
        let marker = if exists && !found_config {
            found_config = true;
            " (active)".green()
        } else if exists {
            " (exists)".dimmed()
        } else {
            "".normal()
        };

        println!("  {}. {}{marker}", i + 1, path.display());
    }

    if !found_config {
        println!("\n{}", "No configuration file found, using defaults.".dimmed());
    }
}

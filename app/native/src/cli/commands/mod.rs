//! CLI command definitions using Clap.
//!
//! Commands are organized into submodules:
//!
//! - `layout` - Accordion placements for a synthetic container
//! - `simulate` - One tiling pass against an in-memory desktop
//! - `keys` - Compiled leader bindings
//! - `config_cmd` - Configuration file inspection

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::config::ConfigStore;
use crate::error::ConcertinaError;
use crate::schema;

pub mod config_cmd;
pub mod keys;
pub mod layout;
pub mod simulate;

pub use config_cmd::ConfigCommands;
pub use keys::KeysArgs;
pub use layout::LayoutArgs;
pub use simulate::SimulateArgs;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Concertina CLI - accordion tiling with a leader key.
#[derive(Parser, Debug)]
#[command(name = "concertina")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Print the frames the layout engine computes for a container.
    Layout(LayoutArgs),

    /// Run one tiling pass against an in-memory desktop.
    ///
    /// Opens the requested windows on a virtual monitor, tiles them with the
    /// active configuration and prints where each window ended up.
    Simulate(SimulateArgs),

    /// List the leader bindings compiled from the configuration.
    Keys(KeysArgs),

    /// Configuration file commands.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Output the configuration JSON Schema.
    ///
    /// Outputs a JSON Schema to stdout that describes the structure of the
    /// configuration file. Can be redirected to a file for use with editors
    /// that support JSON Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Outputs shell completion script to stdout for the specified shell.
    /// Can be used with eval or redirected to a file.
    ///
    /// Usage:
    ///   eval "$(concertina completions --shell zsh)"
    ///   concertina completions --shell fish > ~/.config/fish/completions/concertina.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Loads the configuration store for this invocation.
    ///
    /// An explicit `--config` path must load; the default locations fall
    /// back to built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit configuration file is missing or invalid.
    pub fn load_config(&self) -> Result<ConfigStore, ConcertinaError> {
        match &self.config {
            Some(path) => {
                if !path.exists() {
                    return Err(ConcertinaError::ConfigError(format!(
                        "Configuration file not found: {}",
                        path.display()
                    )));
                }
                Ok(ConfigStore::load(Some(path))?)
            }
            None => Ok(ConfigStore::load_or_default(None)),
        }
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), ConcertinaError> {
        match &self.command {
            Commands::Layout(args) => layout::execute(args, &self.load_config()?),
            Commands::Simulate(args) => simulate::execute(args, &self.load_config()?),
            Commands::Keys(args) => keys::execute(args, &self.load_config()?),
            Commands::Config(cmd) => config_cmd::execute(cmd, self),
            Commands::Schema => {
                println!("{}", schema::print_schema());
                Ok(())
            }
            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "concertina", &mut io::stdout());
    }
}

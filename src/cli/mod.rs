//! Command-line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Evently - event management backend
#[derive(Parser)]
#[command(name = "evently")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default search path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Create a default config file
    #[command(long_flag = "init")]
    Init,

    /// Seed the default event categories and exit
    Seed,

    /// Load and validate the config, then print it
    CheckConfig,
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve { port: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::parse_from(["evently"]);
        assert_eq!(cli.command(), Commands::Serve { port: None });
    }

    #[test]
    fn parses_subcommands_and_global_config() {
        let cli = Cli::parse_from(["evently", "serve", "--port", "9000", "--config", "x.toml"]);
        assert_eq!(cli.command(), Commands::Serve { port: Some(9000) });
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));

        let cli = Cli::parse_from(["evently", "check-config"]);
        assert_eq!(cli.command(), Commands::CheckConfig);

        let cli = Cli::parse_from(["evently", "--init"]);
        assert_eq!(cli.command(), Commands::Init);
    }
}

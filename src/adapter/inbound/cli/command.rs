//! Command-line interface definitions.
//!
//! Defines the CLI structure for the hashtrend service using `clap`: serving
//! the HTTP API, running a one-off eviction sweep, printing the current
//! trending listing, and validating configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Hashtag trending-topics service
#[derive(Parser, Debug)]
#[command(name = "hashtrend")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the hashtrend CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the HTTP API and run the eviction sweeper
    Serve,

    /// Run one eviction sweep against the configured store
    Sweep,

    /// Print the current trending hashtags, bypassing the cache
    Top(TopArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Arguments for the `top` subcommand.
#[derive(Parser, Debug)]
pub struct TopArgs {
    /// Number of hashtags to show (defaults to `trending.top_n`).
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Subcommands for `hashtrend config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate a configuration file for correctness.
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_local_file() {
        let cli = Cli::try_parse_from(["hashtrend", "serve"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("config.toml"));
        assert!(matches!(cli.command, Commands::Serve));
    }

    #[test]
    fn config_flag_is_global() {
        let cli =
            Cli::try_parse_from(["hashtrend", "config", "validate", "--config", "/etc/ht.toml"])
                .unwrap();
        assert_eq!(cli.config, PathBuf::from("/etc/ht.toml"));
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommand::Validate)
        ));
    }

    #[test]
    fn top_accepts_limit() {
        let cli = Cli::try_parse_from(["hashtrend", "top", "--limit", "3"]).unwrap();
        let Commands::Top(args) = cli.command else {
            panic!("expected top");
        };
        assert_eq!(args.limit, Some(3));

        let cli = Cli::try_parse_from(["hashtrend", "--json", "top"]).unwrap();
        assert!(cli.json);
    }

    #[test]
    fn rejects_unknown_command() {
        assert!(Cli::try_parse_from(["hashtrend", "run"]).is_err());
    }
}

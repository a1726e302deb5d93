//! Command dispatch.

use super::command::{Cli, Commands, ConfigCommand};
use super::{config, output, serve, sweep, top};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Dispatch a parsed command line.
///
/// Commands other than `config` load the configuration file and initialize
/// logging first.
pub async fn run(cli: Cli) -> Result<()> {
    output::configure(output::OutputConfig::new(cli.json, cli.quiet));

    match cli.command {
        Commands::Config(ConfigCommand::Show) => config::execute_show(&cli.config),
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(&cli.config),
        Commands::Serve => {
            let config = Config::load(&cli.config)?;
            config.init_logging();
            serve::execute(&config).await
        }
        Commands::Sweep => {
            let config = Config::load(&cli.config)?;
            config.init_logging();
            sweep::execute(&config).await
        }
        Commands::Top(args) => {
            let config = Config::load(&cli.config)?;
            config.init_logging();
            top::execute(&config, args.limit).await
        }
    }
}

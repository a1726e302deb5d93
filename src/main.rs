use anyhow::Context;
use clap::Parser;

use hashtrend::adapter::inbound::cli::{self, command::Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let config_path = cli.config.display().to_string();

    cli::run(cli)
        .await
        .with_context(|| format!("hashtrend failed (config: {config_path})"))
}

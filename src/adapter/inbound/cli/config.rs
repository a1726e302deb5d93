//! Handler for the `config` command group.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    output::section("Effective Configuration");
    output::field("Path", path.display());
    output::field("Database", &config.database);
    output::field("Log level", &config.logging.level);
    output::field("Log format", config.logging.format.as_str());

    output::section("Store");
    output::field("Backend", config.store.backend.as_str());
    output::field("Pool size", config.store.pool_size);

    output::section("Trending");
    output::field("Retention", format!("{}s", config.trending.retention_secs));
    output::field(
        "Sweep interval",
        format!("{}s", config.trending.sweep_interval_secs),
    );
    output::field("Cache TTL", format!("{}s", config.trending.cache_ttl_secs));
    output::field("Top N", config.trending.top_n);

    output::section("Server");
    output::field("Bind", &config.server.bind);
    output::field("API tokens", config.server.token_set().len());

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    output::section("Config Validation");
    output::field("Path", path.display());
    let config = Config::load(path)?;
    output::success("Config file is valid");

    if config.validate_for_serve().is_err() {
        output::warning("No API tokens configured; `serve` will refuse to start");
    }

    Ok(())
}

//! Handler for the `serve` command.

use std::sync::Arc;

use tracing::info;

use crate::adapter::inbound::http::{self, AppState};
use crate::error::Result;
use crate::infrastructure::bootstrap::build_components;
use crate::infrastructure::config::settings::Config;

/// Serve the HTTP API with the eviction sweeper running alongside it.
///
/// Returns after a shutdown signal once in-flight requests have drained.
pub async fn execute(config: &Config) -> Result<()> {
    config.validate_for_serve()?;
    let addr = config.bind_addr()?;

    let components = build_components(config)?;
    let sweeper = Arc::clone(&components.sweeper).start();

    info!(
        backend = components.store.backend_name(),
        top_n = config.trending.top_n,
        "hashtrend starting"
    );

    let state = AppState::new(components.service, config.server.token_set());
    let served = http::serve(addr, state, http::shutdown_signal()).await;

    sweeper.shutdown().await;
    info!("hashtrend stopped");
    served
}

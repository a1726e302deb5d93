//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::memory::InMemoryTrendingStore;
use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
use crate::adapter::outbound::sqlite::store::SqliteTrendingStore;
use crate::application::cache::trending::TopTrendingCache;
use crate::application::trending::{EvictionSweeper, TrendingService};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::store::StoreBackend;
use crate::port::{Clock, SystemClock, TrendingStore};

/// Everything the runtime surfaces (HTTP, CLI) need.
pub struct Components {
    pub store: Arc<dyn TrendingStore>,
    pub service: Arc<TrendingService>,
    pub sweeper: Arc<EvictionSweeper>,
}

/// Open the configured trending store, migrating SQLite if needed.
pub fn build_store(config: &Config, clock: Arc<dyn Clock>) -> Result<Arc<dyn TrendingStore>> {
    let store: Arc<dyn TrendingStore> = match config.store.backend {
        StoreBackend::Memory => Arc::new(InMemoryTrendingStore::new(clock)),
        StoreBackend::Sqlite => {
            let pool = create_pool(&config.database, config.store.pool_size)?;
            run_migrations(&pool)?;
            Arc::new(SqliteTrendingStore::new(pool, clock))
        }
    };

    info!(
        backend = store.backend_name(),
        database = %config.database,
        "Trending store ready"
    );
    Ok(store)
}

/// Wire store, cache, service and sweeper on the system clock.
pub fn build_components(config: &Config) -> Result<Components> {
    build_components_with_clock(config, Arc::new(SystemClock))
}

/// Wire store, cache, service and sweeper on the given clock.
pub fn build_components_with_clock(config: &Config, clock: Arc<dyn Clock>) -> Result<Components> {
    let store = build_store(config, Arc::clone(&clock))?;
    let cache = Arc::new(TopTrendingCache::new(
        config.trending.cache_ttl(),
        Arc::clone(&clock),
    ));
    let service = Arc::new(TrendingService::new(
        Arc::clone(&store),
        cache,
        Arc::clone(&clock),
        config.trending.top_n,
    ));
    let sweeper = Arc::new(EvictionSweeper::new(
        Arc::clone(&store),
        clock,
        config.trending.retention(),
        config.trending.sweep_interval(),
    ));

    Ok(Components {
        store,
        service,
        sweeper,
    })
}

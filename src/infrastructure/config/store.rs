//! Trending store selection.

use serde::Deserialize;

/// Which [`TrendingStore`](crate::port::TrendingStore) backs the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Diesel/SQLite database at the configured `database` path.
    #[default]
    Sqlite,
    /// Process-local map; contents are lost on exit.
    Memory,
}

impl StoreBackend {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Memory => "memory",
        }
    }
}

/// Store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Maximum pooled SQLite connections.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

fn default_pool_size() -> u32 {
    5
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            pool_size: default_pool_size(),
        }
    }
}

//! Trending retention, sweep and cache settings.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::DEFAULT_TOP_N;

/// Largest listing the trending query may be configured to serve.
pub const MAX_TOP_N: usize = 100;

/// Upper bound for the retention window and cache TTL (ten years).
pub const MAX_WINDOW_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// Trending configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TrendingConfig {
    /// How long a contribution counts towards its hashtag.
    #[serde(default = "default_retention_secs")]
    pub retention_secs: u64,
    /// Time between eviction sweeps.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
    /// Lifetime of a cached trending listing.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Hashtags served by the trending query.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_retention_secs() -> u64 {
    3 * 24 * 60 * 60
}

fn default_sweep_interval_secs() -> u64 {
    60 * 60
}

fn default_cache_ttl_secs() -> u64 {
    60 * 60
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            retention_secs: default_retention_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            top_n: default_top_n(),
        }
    }
}

impl TrendingConfig {
    #[must_use]
    pub fn retention(&self) -> chrono::Duration {
        seconds(self.retention_secs)
    }

    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    #[must_use]
    pub fn cache_ttl(&self) -> chrono::Duration {
        seconds(self.cache_ttl_secs)
    }
}

fn seconds(secs: u64) -> chrono::Duration {
    chrono::Duration::seconds(i64::try_from(secs.min(MAX_WINDOW_SECS)).unwrap_or(0))
}

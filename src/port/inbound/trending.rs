//! Trending use cases exposed to inbound adapters.

use async_trait::async_trait;

use super::post_event::PostEvent;
use crate::domain::TopicCount;
use crate::error::Result;

/// Application capabilities driven by the HTTP and CLI adapters.
#[async_trait]
pub trait TrendingApi: Send + Sync {
    /// Apply a post-lifecycle event to the trending aggregates.
    ///
    /// Best-effort: store failures are logged, never returned, so the
    /// caller's post operation is never blocked by trending bookkeeping.
    async fn apply(&self, event: PostEvent);

    /// The current trending listing, served from cache when fresh.
    ///
    /// Fails only when the cache is cold and the store read fails.
    async fn trending(&self) -> Result<Vec<TopicCount>>;
}

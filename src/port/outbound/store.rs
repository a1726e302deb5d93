//! Persistence port for trending aggregates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Hashtag, PostId, TopicCount, TrendingEntry};
use crate::error::Result;

/// Result of evicting stale contributions from one entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Eviction {
    /// Contributions dropped.
    pub evicted: usize,
    /// True when the entry became empty and was deleted.
    pub deleted: bool,
}

/// Storage operations for per-hashtag trending aggregates.
///
/// Every mutating method is a single atomic read-modify-write on one entry:
/// concurrent calls touching the same hashtag must not lose updates.
/// Missing entries are never an error; the call is a no-op instead. Only
/// failures of the backing store are returned.
///
/// # Thread Safety
///
/// Implementations are shared by all request handlers and the eviction
/// sweeper, so they must be `Send + Sync`.
#[async_trait]
pub trait TrendingStore: Send + Sync {
    /// Add `post_id`'s contribution to `hashtag`, creating the entry if needed.
    ///
    /// Returns `false` when the post was already counted for this hashtag.
    async fn record(
        &self,
        hashtag: &Hashtag,
        post_id: &PostId,
        created_at: DateTime<Utc>,
    ) -> Result<bool>;

    /// Remove `post_id`'s contribution from `hashtag`.
    ///
    /// Deletes the entry when its last contribution goes. Returns `false`
    /// when there was nothing to remove.
    async fn remove(&self, hashtag: &Hashtag, post_id: &PostId) -> Result<bool>;

    /// Drop contributions to `hashtag` created strictly before `cutoff`,
    /// deleting the entry if none remain.
    async fn evict_before(&self, hashtag: &Hashtag, cutoff: DateTime<Utc>) -> Result<Eviction>;

    /// All hashtags that currently have an entry.
    async fn hashtags(&self) -> Result<Vec<Hashtag>>;

    /// Load one entry.
    async fn get(&self, hashtag: &Hashtag) -> Result<Option<TrendingEntry>>;

    /// The `n` entries with the highest post count, ties broken by hashtag
    /// ascending.
    async fn top_n(&self, n: usize) -> Result<Vec<TopicCount>>;

    /// Backend name for logging.
    fn backend_name(&self) -> &'static str;
}

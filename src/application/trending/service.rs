//! Trending bookkeeping and the trending query.
//!
//! Post-lifecycle hooks translate post changes into per-hashtag store
//! mutations. Each hashtag is handled on its own: a store failure on one is
//! logged and the rest still run, and nothing is ever returned to the
//! caller's post operation.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, error, warn};

use crate::application::cache::trending::TopTrendingCache;
use crate::domain::{extract_hashtags, Hashtag, PostId, TopicCount};
use crate::error::Result;
use crate::port::inbound::post_event::deleted_hashtags;
use crate::port::{Clock, PostEvent, TrendingApi, TrendingStore};

/// Per-hook tally of store calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Applied {
    /// Calls that changed an entry.
    pub changed: usize,
    /// Calls that left the entry as it was (duplicate or missing).
    pub unchanged: usize,
    /// Calls the store rejected.
    pub failed: usize,
}

impl Applied {
    /// Count one store call. Store outages are expected and retried by
    /// later events, so they log as warnings; anything else means a
    /// corrupt entry and logs as an error.
    fn tally(
        &mut self,
        result: Result<bool>,
        op: &'static str,
        hashtag: &Hashtag,
        post_id: &PostId,
    ) {
        match result {
            Ok(true) => self.changed += 1,
            Ok(false) => self.unchanged += 1,
            Err(e) if e.is_store_io() => {
                warn!(
                    op,
                    hashtag = %hashtag,
                    post_id = %post_id,
                    error = %e,
                    "Trending update failed"
                );
                self.failed += 1;
            }
            Err(e) => {
                error!(
                    op,
                    hashtag = %hashtag,
                    post_id = %post_id,
                    error = %e,
                    "Trending entry is corrupt"
                );
                self.failed += 1;
            }
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            changed: self.changed + other.changed,
            unchanged: self.unchanged + other.unchanged,
            failed: self.failed + other.failed,
        }
    }
}

/// Trending use cases over a shared store and read cache.
pub struct TrendingService {
    store: Arc<dyn TrendingStore>,
    cache: Arc<TopTrendingCache>,
    clock: Arc<dyn Clock>,
    top_n: usize,
}

impl TrendingService {
    pub fn new(
        store: Arc<dyn TrendingStore>,
        cache: Arc<TopTrendingCache>,
        clock: Arc<dyn Clock>,
        top_n: usize,
    ) -> Self {
        Self {
            store,
            cache,
            clock,
            top_n,
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn TrendingStore> {
        &self.store
    }

    /// Count `post_id` towards `hashtag`. Idempotent per post.
    pub async fn record_contribution(
        &self,
        hashtag: &Hashtag,
        post_id: &PostId,
        created_at: DateTime<Utc>,
    ) -> Result<bool> {
        self.store.record(hashtag, post_id, created_at).await
    }

    /// Stop counting `post_id` towards `hashtag`; a missing pair is a no-op.
    pub async fn remove_contribution(&self, hashtag: &Hashtag, post_id: &PostId) -> Result<bool> {
        self.store.remove(hashtag, post_id).await
    }

    /// Remove a deleted post from exactly the hashtags it carried.
    pub async fn apply_post_deletion(
        &self,
        post_id: &PostId,
        hashtags: &BTreeSet<Hashtag>,
    ) -> Applied {
        let mut applied = Applied::default();
        for hashtag in hashtags {
            let result = self.remove_contribution(hashtag, post_id).await;
            applied.tally(result, "remove", hashtag, post_id);
        }
        applied
    }

    /// Move an edited post from its old hashtags to its new ones.
    ///
    /// Every old hashtag is removed before any new one is recorded, so tags
    /// present in both sets end up counted once with the edit time.
    pub async fn apply_post_edit(
        &self,
        post_id: &PostId,
        old_hashtags: &BTreeSet<Hashtag>,
        new_hashtags: &BTreeSet<Hashtag>,
    ) -> Applied {
        let removed = self.apply_post_deletion(post_id, old_hashtags).await;
        let recorded = self
            .record_all(post_id, new_hashtags, self.clock.now())
            .await;
        removed.merge(recorded)
    }

    /// Hook for a newly published post.
    pub async fn on_post_created(
        &self,
        post_id: &PostId,
        content: &str,
        created_at: Option<DateTime<Utc>>,
    ) -> Applied {
        let hashtags = extract_hashtags(content);
        let created_at = created_at.unwrap_or_else(|| self.clock.now());
        self.record_all(post_id, &hashtags, created_at).await
    }

    /// Hook for a deleted post with its last known hashtag set.
    pub async fn on_post_deleted(&self, post_id: &PostId, hashtags: &BTreeSet<Hashtag>) -> Applied {
        self.apply_post_deletion(post_id, hashtags).await
    }

    /// Hook for a post whose content changed.
    pub async fn on_post_edited(
        &self,
        post_id: &PostId,
        old_content: &str,
        new_content: &str,
    ) -> Applied {
        self.apply_post_edit(
            post_id,
            &extract_hashtags(old_content),
            &extract_hashtags(new_content),
        )
        .await
    }

    /// Dispatch a post-lifecycle event to its hook.
    pub async fn handle(&self, event: PostEvent) -> Applied {
        let kind = event.kind();
        let applied = match event {
            PostEvent::Created {
                post_id,
                content,
                created_at,
            } => self.on_post_created(&post_id, &content, created_at).await,
            PostEvent::Deleted {
                post_id,
                hashtags,
                content,
            } => {
                let hashtags = deleted_hashtags(hashtags, content.as_deref());
                self.on_post_deleted(&post_id, &hashtags).await
            }
            PostEvent::Edited {
                post_id,
                old_content,
                new_content,
            } => {
                self.on_post_edited(&post_id, &old_content, &new_content)
                    .await
            }
        };

        debug!(
            kind,
            changed = applied.changed,
            unchanged = applied.unchanged,
            failed = applied.failed,
            "Applied post event"
        );
        applied
    }

    /// Fresh top-`n` straight from the store, bypassing the cache.
    pub async fn top_n(&self, n: usize) -> Result<Vec<TopicCount>> {
        self.store.top_n(n).await
    }

    /// The trending listing: cached when fresh, otherwise recomputed and
    /// cached.
    pub async fn trending(&self) -> Result<Vec<TopicCount>> {
        if let Some(cached) = self.cache.get() {
            return Ok(cached.topics().to_vec());
        }

        debug!(backend = self.store.backend_name(), "Trending cache miss");
        let topics = self.top_n(self.top_n).await?;
        self.cache.set(topics.clone());
        Ok(topics)
    }

    async fn record_all(
        &self,
        post_id: &PostId,
        hashtags: &BTreeSet<Hashtag>,
        created_at: DateTime<Utc>,
    ) -> Applied {
        let mut applied = Applied::default();
        for hashtag in hashtags {
            let result = self.record_contribution(hashtag, post_id, created_at).await;
            applied.tally(result, "record", hashtag, post_id);
        }
        applied
    }
}

#[async_trait]
impl TrendingApi for TrendingService {
    async fn apply(&self, event: PostEvent) {
        self.handle(event).await;
    }

    async fn trending(&self) -> Result<Vec<TopicCount>> {
        TrendingService::trending(self).await
    }
}

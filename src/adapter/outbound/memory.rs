//! In-memory trending store.
//!
//! Backs the service when no database is configured and in tests. Entries
//! live in a sharded concurrent map; every mutation holds the shard lock for
//! its key across the whole read-modify-write, so concurrent writers on the
//! same hashtag never lose updates.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{rank_top_n, Hashtag, PostId, TopicCount, TrendingEntry};
use crate::error::Result;
use crate::port::{Clock, Eviction, TrendingStore};

/// Thread-safe in-memory trending store.
pub struct InMemoryTrendingStore {
    entries: DashMap<Hashtag, TrendingEntry>,
    clock: Arc<dyn Clock>,
}

impl InMemoryTrendingStore {
    /// Create an empty store.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }
}

#[async_trait]
impl TrendingStore for InMemoryTrendingStore {
    async fn record(
        &self,
        hashtag: &Hashtag,
        post_id: &PostId,
        created_at: DateTime<Utc>,
    ) -> Result<bool> {
        let inserted = match self.entries.entry(hashtag.clone()) {
            Entry::Occupied(mut occupied) => occupied.get_mut().record(post_id.clone(), created_at),
            Entry::Vacant(vacant) => {
                vacant.insert(TrendingEntry::new(hashtag.clone(), post_id.clone(), created_at));
                true
            }
        };
        Ok(inserted)
    }

    async fn remove(&self, hashtag: &Hashtag, post_id: &PostId) -> Result<bool> {
        let now = self.clock.now();
        let removed = match self.entries.entry(hashtag.clone()) {
            Entry::Occupied(mut occupied) => {
                let removed = occupied.get_mut().remove(post_id, now);
                if occupied.get().is_empty() {
                    occupied.remove();
                }
                removed
            }
            Entry::Vacant(_) => false,
        };
        Ok(removed)
    }

    async fn evict_before(&self, hashtag: &Hashtag, cutoff: DateTime<Utc>) -> Result<Eviction> {
        let now = self.clock.now();
        let eviction = match self.entries.entry(hashtag.clone()) {
            Entry::Occupied(mut occupied) => {
                let evicted = occupied.get_mut().evict_before(cutoff, now);
                let deleted = occupied.get().is_empty();
                if deleted {
                    occupied.remove();
                }
                Eviction { evicted, deleted }
            }
            Entry::Vacant(_) => Eviction::default(),
        };
        Ok(eviction)
    }

    async fn hashtags(&self) -> Result<Vec<Hashtag>> {
        Ok(self.entries.iter().map(|e| e.key().clone()).collect())
    }

    async fn get(&self, hashtag: &Hashtag) -> Result<Option<TrendingEntry>> {
        Ok(self.entries.get(hashtag).map(|e| e.value().clone()))
    }

    async fn top_n(&self, n: usize) -> Result<Vec<TopicCount>> {
        let topics = self
            .entries
            .iter()
            .map(|e| e.value().topic_count())
            .collect();
        Ok(rank_top_n(topics, n))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

//! Store wrapper that fails on demand.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::domain::{Hashtag, PostId, TopicCount, TrendingEntry};
use crate::error::{Error, Result};
use crate::port::{Eviction, TrendingStore};

/// Wraps a real store and injects store I/O failures.
///
/// Individual hashtags can be poisoned (every write touching them fails), or
/// the whole store can be taken offline.
pub struct FlakyStore {
    inner: Arc<dyn TrendingStore>,
    poisoned: Mutex<HashSet<Hashtag>>,
    offline: AtomicBool,
}

impl FlakyStore {
    pub fn new(inner: Arc<dyn TrendingStore>) -> Self {
        Self {
            inner,
            poisoned: Mutex::new(HashSet::new()),
            offline: AtomicBool::new(false),
        }
    }

    /// Make every write touching `hashtag` fail.
    pub fn poison(&self, hashtag: &Hashtag) {
        self.poisoned.lock().insert(hashtag.clone());
    }

    /// Fail every call, reads included.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check(&self, hashtag: Option<&Hashtag>) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(Error::Connection("store offline".into()));
        }
        if let Some(tag) = hashtag {
            if self.poisoned.lock().contains(tag) {
                return Err(Error::Database(format!("write rejected for {tag}")));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TrendingStore for FlakyStore {
    async fn record(
        &self,
        hashtag: &Hashtag,
        post_id: &PostId,
        created_at: DateTime<Utc>,
    ) -> Result<bool> {
        self.check(Some(hashtag))?;
        self.inner.record(hashtag, post_id, created_at).await
    }

    async fn remove(&self, hashtag: &Hashtag, post_id: &PostId) -> Result<bool> {
        self.check(Some(hashtag))?;
        self.inner.remove(hashtag, post_id).await
    }

    async fn evict_before(&self, hashtag: &Hashtag, cutoff: DateTime<Utc>) -> Result<Eviction> {
        self.check(Some(hashtag))?;
        self.inner.evict_before(hashtag, cutoff).await
    }

    async fn hashtags(&self) -> Result<Vec<Hashtag>> {
        self.check(None)?;
        self.inner.hashtags().await
    }

    async fn get(&self, hashtag: &Hashtag) -> Result<Option<TrendingEntry>> {
        self.check(None)?;
        self.inner.get(hashtag).await
    }

    async fn top_n(&self, n: usize) -> Result<Vec<TopicCount>> {
        self.check(None)?;
        self.inner.top_n(n).await
    }

    fn backend_name(&self) -> &'static str {
        "flaky"
    }
}

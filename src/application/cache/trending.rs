//! Read cache for the trending listing.
//!
//! Holds one precomputed top-N snapshot. The snapshot expires by age only;
//! store writes do not invalidate it, so a served listing can lag the
//! aggregates by at most one TTL.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

use crate::domain::TopicCount;
use crate::port::Clock;

/// A cached trending listing and the time it was computed.
#[derive(Debug, Clone)]
pub struct CachedTrending {
    topics: Arc<Vec<TopicCount>>,
    created_at: DateTime<Utc>,
}

impl CachedTrending {
    #[must_use]
    pub fn topics(&self) -> &[TopicCount] {
        &self.topics
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Single-slot TTL cache for the top-N listing.
///
/// `set` is last-writer-wins: two concurrent misses may both recompute and
/// both store, and either snapshot is acceptable.
#[derive(Debug)]
pub struct TopTrendingCache {
    slot: RwLock<Option<CachedTrending>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TopTrendingCache {
    /// Create an empty cache with the given TTL.
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
            clock,
        }
    }

    /// The cached listing, if present and younger than the TTL.
    #[must_use]
    pub fn get(&self) -> Option<CachedTrending> {
        let slot = self.slot.read();
        let cached = slot.as_ref()?;

        if self.clock.now() - cached.created_at >= self.ttl {
            return None;
        }

        Some(cached.clone())
    }

    /// Replace the cached listing, stamping it with the current time.
    pub fn set(&self, topics: Vec<TopicCount>) -> CachedTrending {
        let cached = CachedTrending {
            topics: Arc::new(topics),
            created_at: self.clock.now(),
        };
        *self.slot.write() = Some(cached.clone());
        cached
    }
}

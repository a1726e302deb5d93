//! Trending aggregate types.
//!
//! A [`TrendingEntry`] is the per-hashtag aggregate: the set of posts that
//! currently contribute to the hashtag, each with the time it was recorded.
//! The post count is always derived from that set, never stored on its own.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::hashtag::Hashtag;
use super::id::PostId;

/// Number of hashtags served by the trending query.
pub const DEFAULT_TOP_N: usize = 10;

/// One post's contribution to a hashtag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub post_id: PostId,
    pub created_at: DateTime<Utc>,
}

/// Aggregate state for one hashtag.
///
/// Holds at most one contribution per post. An entry with no contributions
/// is never persisted; stores delete it as soon as [`is_empty`](Self::is_empty)
/// becomes true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingEntry {
    hashtag: Hashtag,
    contributions: BTreeMap<PostId, DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

impl TrendingEntry {
    /// Create an entry holding a single contribution.
    #[must_use]
    pub fn new(hashtag: Hashtag, post_id: PostId, created_at: DateTime<Utc>) -> Self {
        let mut contributions = BTreeMap::new();
        contributions.insert(post_id, created_at);
        Self {
            hashtag,
            contributions,
            updated_at: created_at,
        }
    }

    /// Rebuild an entry from persisted parts.
    ///
    /// Later duplicates of the same post are dropped so the one-contribution-
    /// per-post invariant holds even for hand-edited rows.
    #[must_use]
    pub fn from_parts(
        hashtag: Hashtag,
        contributions: impl IntoIterator<Item = Contribution>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let mut map = BTreeMap::new();
        for c in contributions {
            map.entry(c.post_id).or_insert(c.created_at);
        }
        Self {
            hashtag,
            contributions: map,
            updated_at,
        }
    }

    #[must_use]
    pub fn hashtag(&self) -> &Hashtag {
        &self.hashtag
    }

    /// Number of live contributions.
    #[must_use]
    pub fn post_count(&self) -> usize {
        self.contributions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }

    #[must_use]
    pub fn contains(&self, post_id: &PostId) -> bool {
        self.contributions.contains_key(post_id)
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Contributions ordered by post id.
    pub fn contributions(&self) -> impl Iterator<Item = Contribution> + '_ {
        self.contributions
            .iter()
            .map(|(post_id, created_at)| Contribution {
                post_id: post_id.clone(),
                created_at: *created_at,
            })
    }

    /// Add a contribution. Returns `false` if the post was already counted,
    /// in which case the original timestamp is kept.
    pub fn record(&mut self, post_id: PostId, created_at: DateTime<Utc>) -> bool {
        if self.contributions.contains_key(&post_id) {
            return false;
        }
        self.contributions.insert(post_id, created_at);
        self.updated_at = created_at;
        true
    }

    /// Remove a post's contribution. Returns `false` if it was not present.
    pub fn remove(&mut self, post_id: &PostId, now: DateTime<Utc>) -> bool {
        let removed = self.contributions.remove(post_id).is_some();
        if removed {
            self.updated_at = now;
        }
        removed
    }

    /// Drop contributions created strictly before `cutoff`.
    ///
    /// A contribution created exactly at `cutoff` is retained. Returns the
    /// number of contributions dropped.
    pub fn evict_before(&mut self, cutoff: DateTime<Utc>, now: DateTime<Utc>) -> usize {
        let before = self.contributions.len();
        self.contributions.retain(|_, created_at| *created_at >= cutoff);
        let evicted = before - self.contributions.len();
        if evicted > 0 {
            self.updated_at = now;
        }
        evicted
    }

    /// Snapshot for the trending listing.
    #[must_use]
    pub fn topic_count(&self) -> TopicCount {
        TopicCount {
            hashtag: self.hashtag.clone(),
            post_count: self.post_count(),
        }
    }
}

/// A `(hashtag, postCount)` pair as served by the trending query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicCount {
    pub hashtag: Hashtag,
    pub post_count: usize,
}

impl TopicCount {
    /// Trending order: higher count first, ties broken by hashtag ascending.
    #[must_use]
    pub fn trending_cmp(&self, other: &Self) -> Ordering {
        other
            .post_count
            .cmp(&self.post_count)
            .then_with(|| self.hashtag.cmp(&other.hashtag))
    }
}

/// Sort `topics` into trending order and keep the first `n`.
#[must_use]
pub fn rank_top_n(mut topics: Vec<TopicCount>, n: usize) -> Vec<TopicCount> {
    topics.sort_by(TopicCount::trending_cmp);
    topics.truncate(n);
    topics
}

//! SQLite trending store implementation.
//!
//! One row per hashtag. The contribution set lives in a JSON text column and
//! `post_count` is rewritten from it on every change, so the ranking index
//! never drifts from the set. Every read-modify-write runs inside an
//! `IMMEDIATE` transaction, which takes the database write lock before the
//! read.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::TrendingRow;
use crate::adapter::outbound::sqlite::database::schema::trending_topics;
use crate::domain::{Contribution, Hashtag, PostId, TopicCount, TrendingEntry};
use crate::error::{Error, Result};
use crate::port::{Clock, Eviction, TrendingStore};

/// SQLite-backed trending store.
pub struct SqliteTrendingStore {
    /// Database connection pool.
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl SqliteTrendingStore {
    /// Create a store over a migrated connection pool.
    #[must_use]
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    fn to_row(entry: &TrendingEntry) -> Result<TrendingRow> {
        let contributions: Vec<Contribution> = entry.contributions().collect();
        let post_count = i32::try_from(contributions.len())
            .map_err(|_| Error::Parse(format!("post count overflow for {}", entry.hashtag())))?;

        Ok(TrendingRow {
            hashtag: entry.hashtag().as_str().to_string(),
            post_count,
            contributions: serde_json::to_string(&contributions)
                .map_err(|e| Error::Parse(e.to_string()))?,
            updated_at: entry.updated_at().to_rfc3339(),
        })
    }

    fn from_row(row: TrendingRow) -> Result<TrendingEntry> {
        let hashtag = Hashtag::try_new(&row.hashtag)?;
        let contributions: Vec<Contribution> =
            serde_json::from_str(&row.contributions).map_err(|e| Error::Parse(e.to_string()))?;
        let updated_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&row.updated_at)
            .map_err(|e| Error::Parse(e.to_string()))?
            .with_timezone(&Utc);

        Ok(TrendingEntry::from_parts(hashtag, contributions, updated_at))
    }

    fn connection(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>>
    {
        self.pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))
    }

    fn load(conn: &mut SqliteConnection, hashtag: &Hashtag) -> Result<Option<TrendingEntry>> {
        let row: Option<TrendingRow> = trending_topics::table
            .find(hashtag.as_str())
            .select(TrendingRow::as_select())
            .first(conn)
            .optional()?;

        row.map(Self::from_row).transpose()
    }

    /// Write `entry` back, or delete its row once it holds no contributions.
    fn persist(conn: &mut SqliteConnection, entry: &TrendingEntry) -> Result<()> {
        if entry.is_empty() {
            diesel::delete(trending_topics::table.find(entry.hashtag().as_str())).execute(conn)?;
        } else {
            diesel::replace_into(trending_topics::table)
                .values(&Self::to_row(entry)?)
                .execute(conn)?;
        }
        Ok(())
    }
}

#[async_trait]
impl TrendingStore for SqliteTrendingStore {
    async fn record(
        &self,
        hashtag: &Hashtag,
        post_id: &PostId,
        created_at: DateTime<Utc>,
    ) -> Result<bool> {
        let mut conn = self.connection()?;

        conn.immediate_transaction(|conn| {
            let (entry, inserted) = match Self::load(conn, hashtag)? {
                Some(mut entry) => {
                    let inserted = entry.record(post_id.clone(), created_at);
                    (entry, inserted)
                }
                None => (
                    TrendingEntry::new(hashtag.clone(), post_id.clone(), created_at),
                    true,
                ),
            };

            if inserted {
                Self::persist(conn, &entry)?;
            }
            Ok(inserted)
        })
    }

    async fn remove(&self, hashtag: &Hashtag, post_id: &PostId) -> Result<bool> {
        let now = self.clock.now();
        let mut conn = self.connection()?;

        conn.immediate_transaction(|conn| {
            let Some(mut entry) = Self::load(conn, hashtag)? else {
                return Ok(false);
            };

            let removed = entry.remove(post_id, now);
            if removed {
                Self::persist(conn, &entry)?;
            }
            Ok(removed)
        })
    }

    async fn evict_before(&self, hashtag: &Hashtag, cutoff: DateTime<Utc>) -> Result<Eviction> {
        let now = self.clock.now();
        let mut conn = self.connection()?;

        conn.immediate_transaction(|conn| {
            let Some(mut entry) = Self::load(conn, hashtag)? else {
                return Ok(Eviction::default());
            };

            let evicted = entry.evict_before(cutoff, now);
            if evicted > 0 {
                Self::persist(conn, &entry)?;
            }
            Ok(Eviction {
                evicted,
                deleted: entry.is_empty(),
            })
        })
    }

    async fn hashtags(&self) -> Result<Vec<Hashtag>> {
        let mut conn = self.connection()?;

        let names: Vec<String> = trending_topics::table
            .select(trending_topics::hashtag)
            .order(trending_topics::hashtag.asc())
            .load(&mut conn)?;

        names
            .into_iter()
            .map(|name| Hashtag::try_new(name).map_err(Error::from))
            .collect()
    }

    async fn get(&self, hashtag: &Hashtag) -> Result<Option<TrendingEntry>> {
        let mut conn = self.connection()?;
        Self::load(&mut conn, hashtag)
    }

    async fn top_n(&self, n: usize) -> Result<Vec<TopicCount>> {
        let mut conn = self.connection()?;
        let limit = i64::try_from(n).unwrap_or(i64::MAX);

        let rows: Vec<(String, i32)> = trending_topics::table
            .select((trending_topics::hashtag, trending_topics::post_count))
            .order((
                trending_topics::post_count.desc(),
                trending_topics::hashtag.asc(),
            ))
            .limit(limit)
            .load(&mut conn)?;

        rows.into_iter()
            .map(|(name, count)| {
                Ok(TopicCount {
                    hashtag: Hashtag::try_new(name)?,
                    post_count: usize::try_from(count)
                        .map_err(|_| Error::Parse(format!("negative post count: {count}")))?,
                })
            })
            .collect()
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::trending_topics;

/// Database row for one hashtag's trending aggregate.
///
/// `contributions` is a JSON array of `{post_id, created_at}` objects and
/// `post_count` always equals its length.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = trending_topics)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TrendingRow {
    pub hashtag: String,
    pub post_count: i32,
    pub contributions: String,
    pub updated_at: String,
}

//! Storage-agnostic domain types for trending topics.
//!
//! - [`hashtag`]: hashtag tokens and extraction from post text
//! - [`trending`]: the per-hashtag aggregate and ranking
//! - [`id`]: identifier newtypes
//! - [`error`]: validation errors

pub mod error;
pub mod hashtag;
pub mod id;
pub mod trending;

pub use hashtag::{extract_hashtags, Hashtag};
pub use id::PostId;
pub use trending::{rank_top_n, Contribution, TopicCount, TrendingEntry, DEFAULT_TOP_N};

//! Runtime caches used by application services.
//!
//! - [`trending::TopTrendingCache`]: the top-N listing with TTL-based expiration

pub mod trending;

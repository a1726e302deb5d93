//! Hashtrend - hashtag trending topics for a social network.
//!
//! Posts carry hashtags; this crate keeps a per-hashtag count of the posts
//! that mention it within a retention window and serves the most popular
//! ones.
//!
//! # Architecture
//!
//! The crate is laid out as ports and adapters:
//!
//! - **`domain`** - Hashtags, extraction from post text, the per-hashtag
//!   trending aggregate and its ordering
//! - **`port`** - The store and clock the application needs, and the use
//!   cases it offers
//! - **`application`** - Post-lifecycle bookkeeping, the cached trending
//!   query, and the retention sweeper
//! - **`adapter`** - In-memory and SQLite stores, the HTTP API, the CLI
//! - **`infrastructure`** - Configuration, logging, wiring
//!
//! # Example
//!
//! ```no_run
//! use hashtrend::domain::extract_hashtags;
//!
//! let tags = extract_hashtags("Check #AI and #ai and #AI!");
//! assert_eq!(tags.len(), 1);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

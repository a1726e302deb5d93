//! Trending use cases.
//!
//! - [`service::TrendingService`]: post-lifecycle bookkeeping and the cached trending query
//! - [`sweeper::EvictionSweeper`]: periodic retention sweep

pub mod service;
pub mod sweeper;

pub use service::{Applied, TrendingService};
pub use sweeper::{EvictionSweeper, SweepOutcome, SweepReport, SweeperHandle, SweeperState};

//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!   HTTP / CLI ──► inbound::TrendingApi ──► TrendingService
//!                                               │
//!                                               ▼
//!                               outbound::TrendingStore, outbound::Clock
//!                                               │
//!                                  ┌────────────┴────────────┐
//!                                  ▼                         ▼
//!                           memory adapter            sqlite adapter
//! ```

pub mod inbound;
pub mod outbound;

pub use inbound::post_event::PostEvent;
pub use inbound::trending::TrendingApi;
pub use outbound::clock::{Clock, SystemClock};
pub use outbound::store::{Eviction, TrendingStore};

//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`clock`] - [`ManualClock`](clock::ManualClock), a clock tests advance by hand.
//! - [`domain`] - Builders for hashtags, post ids and fixed timestamps.
//! - [`store`] - [`FlakyStore`](store::FlakyStore), a store wrapper that fails on demand.

pub mod clock;
pub mod domain;
pub mod store;

//! SQLite persistence adapters.
//!
//! Provides the SQLite-backed trending store using Diesel ORM.

pub mod database;
pub mod store;

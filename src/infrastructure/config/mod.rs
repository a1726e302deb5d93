//! Infrastructure configuration modules.

pub mod logging;
pub mod server;
pub mod settings;
pub mod store;
pub mod trending;

//! CLI module graph.

pub mod command;
pub mod config;
pub mod output;
pub mod run;
pub mod serve;
pub mod sweep;
pub mod top;

pub use run::run;

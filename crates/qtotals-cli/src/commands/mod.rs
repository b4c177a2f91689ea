//! Subcommand implementations.

pub mod config;
pub mod extract;
pub mod fetch;
pub mod scrape;

//! Data models for qualifying totals and configuration.

pub mod config;
pub mod totals;

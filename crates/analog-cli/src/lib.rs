//! CLI library components for the analog cross-reference tool.

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod logging;
pub mod summary;

pub use error::ConfigError;

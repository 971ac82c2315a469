//! Toggl daily report CLI library.
//!
//! This crate wires flags, configuration and the Toggl client to the report
//! generator in `tdr-core`.

mod cli;
pub mod commands;
mod config;

pub use cli::Cli;
pub use config::{Config, default_config_path};

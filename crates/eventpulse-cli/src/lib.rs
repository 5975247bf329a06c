//! CLI, feed loading, output rendering
//!
//! This crate provides the `eventpulse` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod feed;
pub mod render;

pub use cli::Cli;
pub use error::{CliError, CliResult};

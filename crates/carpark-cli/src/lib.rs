//! Car park manager CLI library.
//!
//! This crate provides the CLI interface for the car park manager.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;

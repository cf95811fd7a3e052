//! CLI subcommand implementations.

pub mod dashboard;
pub mod exit;
pub mod park;
pub mod sessions;
pub mod settings;
pub mod slots;
pub mod transactions;
pub mod util;

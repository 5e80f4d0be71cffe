//! Timebank CLI library.
//!
//! This crate provides the CLI interface and the stateful application
//! wrapper over the pure logic in `tb-core` and the store in `tb-store`.

mod app;
mod cli;
pub mod commands;
mod config;

pub use app::App;
pub use cli::{Cli, Commands};
pub use config::Config;

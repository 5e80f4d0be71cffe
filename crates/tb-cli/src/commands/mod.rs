//! CLI subcommand implementations.

pub mod edit;
pub mod export;
pub mod history;
pub mod report;
pub mod reset;
pub mod settings;
pub mod status;
pub mod timer;
pub mod watch;

//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tb_core::EventKind;

/// Personal time-banking timer.
///
/// Accrues a daily time allowance on configured active days and burns it
/// down with a start/pause timer. The balance can go negative, borrowing
/// against the next day.
#[derive(Debug, Parser)]
#[command(name = "tb", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the timer.
    Start,

    /// Pause the timer, booking the session against today's balance.
    Pause,

    /// Start the timer if paused, pause it if running.
    Toggle,

    /// Zero the timer, booking any running session against today first.
    ResetTimer,

    /// Show timer state, today's entry, and settings.
    Status,

    /// Run the timer display in the foreground, ticking every second.
    Watch {
        /// Stop after this many seconds instead of running until killed.
        #[arg(long = "for", value_name = "SECS")]
        duration: Option<u64>,
    },

    /// Show the timer event log, newest first.
    History {
        /// Maximum number of events to show.
        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// Only show events of this kind: start, pause, or resume.
        #[arg(long)]
        kind: Option<EventKind>,
    },

    /// Show the day-by-day balance ledger.
    Report {
        /// Emit entries as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Manually adjust a day's balance.
    Edit {
        /// The day to adjust, as YYYY-MM-DD.
        date: String,

        /// Signed minutes to add to the balance.
        #[arg(long, allow_negative_numbers = true, conflicts_with = "set")]
        adjust: Option<i64>,

        /// Set the balance to this absolute value in minutes.
        #[arg(long, allow_negative_numbers = true)]
        set: Option<i64>,
    },

    /// Show or change settings.
    Settings {
        /// Daily allowance hours (0-24).
        #[arg(long)]
        hours: Option<i64>,

        /// Daily allowance minutes (0-59).
        #[arg(long)]
        minutes: Option<i64>,

        /// Active weekdays as comma-separated numbers, 0 = Sunday.
        #[arg(long, value_delimiter = ',')]
        days: Option<Vec<u32>>,

        /// Dark mode preference (persisted for UI clients).
        #[arg(long)]
        dark_mode: Option<bool>,
    },

    /// Delete all data and reinitialize default settings.
    Reset {
        /// Confirm the reset.
        #[arg(long)]
        yes: bool,
    },

    /// Write a JSON snapshot of all data to stdout.
    Export,
}

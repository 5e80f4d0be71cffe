//! Core domain logic for the timebank timer.
//!
//! This crate contains the fundamental types and logic for:
//! - Timer engine: start/pause state machine, relaunch recovery, event log
//! - Ledger: daily accrual, usage deduction, negative-balance carry-over
//! - Settings: daily allowance and active-day schedule
//!
//! Everything here is pure: operations take an explicit instant (epoch
//! milliseconds) or calendar day and return new state, so the logic is
//! directly unit-testable with a synthetic clock.

pub mod clock;
pub mod event;
pub mod format;
pub mod ledger;
pub mod settings;
pub mod snapshot;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use event::{EventKind, EventLog, MAX_EVENTS, TimerEvent};
pub use ledger::{Ledger, TimeEntry};
pub use settings::Settings;
pub use snapshot::Snapshot;
pub use timer::{STALE_AFTER_MS, TimerState, Transition, UsageReport};

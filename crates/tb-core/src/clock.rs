//! Wall-clock abstraction.
//!
//! All time-dependent logic in this crate takes explicit instants, but the
//! orchestrating layer still needs a single place to read the clock from.
//! Injecting [`Clock`] there keeps relaunch recovery and day-boundary
//! behavior deterministic under test.

use std::cell::Cell;

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of the current instant and calendar day.
pub trait Clock {
    /// Current instant as milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;

    /// Current calendar day in the local time zone.
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Manually advanced clock for deterministic tests.
///
/// The calendar day is derived from the instant in UTC, which is enough for
/// tests that control the instant directly.
#[derive(Debug)]
pub struct ManualClock {
    now_ms: Cell<i64>,
}

impl ManualClock {
    #[must_use]
    pub const fn new(now_ms: i64) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.set(now_ms);
    }

    pub fn advance(&self, ms: i64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.get()
    }

    fn today(&self) -> NaiveDate {
        DateTime::<Utc>::from_timestamp_millis(self.now_ms.get())
            .map_or_else(NaiveDate::default, |dt| dt.date_naive())
    }
}

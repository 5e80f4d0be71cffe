//! Per-day balance ledger: accrual, usage, carry-over, manual edits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::format::{date_string, next_day};
use crate::settings::Settings;

/// One calendar day's time-entry record, keyed by `date` (`YYYY-MM-DD`,
/// local time). Created lazily, mutated in place, deleted only by a full
/// reset.
///
/// `balance` is signed minutes and may legitimately stay negative: an
/// overdraft is carried forward as a credit on the next day while this
/// day's record keeps the debt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: String,
    pub date: String,
    pub added_minutes: i64,
    pub used_minutes: i64,
    pub balance: i64,
    pub last_updated: i64,
}

impl TimeEntry {
    fn zeroed(date: &str, now_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: date.to_string(),
            added_minutes: 0,
            used_minutes: 0,
            balance: 0,
            last_updated: now_ms,
        }
    }
}

/// The collection of time entries and the operations over them.
///
/// All operations take the relevant calendar day and instant explicitly;
/// "today" is always derived from the live clock by the caller, never
/// cached here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<TimeEntry>,
}

impl Ledger {
    #[must_use]
    pub const fn new(entries: Vec<TimeEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[TimeEntry] {
        &self.entries
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<TimeEntry> {
        self.entries
    }

    /// Entries in display order: lexicographic descending on the date key,
    /// which for `YYYY-MM-DD` is chronological descending.
    #[must_use]
    pub fn sorted(&self) -> Vec<TimeEntry> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    #[must_use]
    pub fn entry_for(&self, date: &str) -> Option<&TimeEntry> {
        self.entries.iter().find(|e| e.date == date)
    }

    /// Today's balance, zero if no entry exists yet.
    #[must_use]
    pub fn balance_for(&self, date: &str) -> i64 {
        self.entry_for(date).map_or(0, |e| e.balance)
    }

    /// Gets or lazily creates the entry for a day, returning its index.
    fn ensure_index(&mut self, date: &str, now_ms: i64) -> usize {
        if let Some(idx) = self.entries.iter().position(|e| e.date == date) {
            return idx;
        }
        self.entries.push(TimeEntry::zeroed(date, now_ms));
        self.entries.len() - 1
    }

    /// Gets or lazily creates the entry for a day.
    pub fn ensure_entry(&mut self, date: &str, now_ms: i64) -> &TimeEntry {
        let idx = self.ensure_index(date, now_ms);
        &self.entries[idx]
    }

    /// Credits the daily allowance for `today` if its weekday is active.
    ///
    /// Idempotent per day: an entry that already has nonzero
    /// `added_minutes` is never topped up again. An entry created earlier
    /// by usage (with `added_minutes == 0`) receives the allowance in
    /// place. Returns whether anything changed.
    pub fn ensure_daily_accrual(
        &mut self,
        today: NaiveDate,
        settings: &Settings,
        now_ms: i64,
    ) -> bool {
        if !settings.is_active_day(today) {
            return false;
        }
        let allowance = settings.daily_minutes();
        let date = date_string(today);
        match self.entries.iter_mut().find(|e| e.date == date) {
            None => {
                let mut entry = TimeEntry::zeroed(&date, now_ms);
                entry.added_minutes = allowance;
                entry.balance = allowance;
                self.entries.push(entry);
                true
            }
            Some(entry) if entry.added_minutes == 0 && allowance > 0 => {
                entry.added_minutes = allowance;
                entry.balance += allowance;
                entry.last_updated = now_ms;
                true
            }
            Some(_) => false,
        }
    }

    /// Deducts used minutes from `today`, borrowing against tomorrow when
    /// the balance goes negative.
    ///
    /// Today's record keeps the (unclamped) negative balance while
    /// tomorrow's entry is pre-credited with the absolute overdraft,
    /// created if absent.
    pub fn record_usage(&mut self, minutes: i64, today: NaiveDate, now_ms: i64) {
        if minutes < 1 {
            return;
        }
        let date = date_string(today);
        let idx = self.ensure_index(&date, now_ms);
        let entry = &mut self.entries[idx];
        entry.used_minutes += minutes;
        entry.balance -= minutes;
        entry.last_updated = now_ms;
        let overdraft = -entry.balance;

        if overdraft > 0 {
            let tomorrow = date_string(next_day(today));
            let next_idx = self.ensure_index(&tomorrow, now_ms);
            let next = &mut self.entries[next_idx];
            next.balance += overdraft;
            next.last_updated = now_ms;
            tracing::debug!(date, overdraft, "carried overdraft to next day");
        }
    }

    /// Adds a signed adjustment to one entry's balance.
    ///
    /// Touches nothing but `balance` and never triggers carry-over; an
    /// absolute "set" is expressed by the caller as a delta from the
    /// current balance. Returns whether the entry was found.
    pub fn edit_entry(&mut self, entry_id: &str, adjustment_minutes: i64, now_ms: i64) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == entry_id) else {
            return false;
        };
        entry.balance += adjustment_minutes;
        entry.last_updated = now_ms;
        true
    }
}

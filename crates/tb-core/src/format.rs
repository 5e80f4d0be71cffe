//! Date and duration formatting helpers shared by the ledger and CLI.

use chrono::NaiveDate;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Formats a calendar day as `YYYY-MM-DD`, the ledger's entry key.
#[must_use]
pub fn date_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The following calendar day. Saturates at the end of the calendar.
#[must_use]
pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

/// Formats signed minutes as `+h:mm` / `-h:mm`.
#[must_use]
pub fn signed_minutes(minutes: i64) -> String {
    let sign = if minutes < 0 { '-' } else { '+' };
    let abs = minutes.abs();
    format!("{sign}{}:{:02}", abs / 60, abs % 60)
}

/// Formats seconds as `h:mm:ss` for the live timer display.
#[must_use]
pub fn hms(total_secs: i64) -> String {
    let secs = total_secs.max(0);
    format!("{}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

/// Human-readable summary of an active-day set.
#[must_use]
pub fn active_days_text(days: &[u32]) -> String {
    let mut sorted: Vec<u32> = days.iter().copied().filter(|d| *d <= 6).collect();
    sorted.sort_unstable();
    sorted.dedup();

    match sorted.as_slice() {
        [] => "None".to_string(),
        [0, 1, 2, 3, 4, 5, 6] => "Every day".to_string(),
        [1, 2, 3, 4, 5] => "Mon-Fri".to_string(),
        [0, 6] => "Weekends".to_string(),
        days => days
            .iter()
            .map(|d| DAY_NAMES[*d as usize])
            .collect::<Vec<_>>()
            .join(", "),
    }
}

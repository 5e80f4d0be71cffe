//! User settings driving daily accrual.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Persisted user settings.
///
/// `active_days` uses weekday numbers with 0 = Sunday, matching the
/// persisted document format. Out-of-range input is clamped at the CLI
/// boundary via [`Settings::clamped`] before it reaches the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub daily_time_hours: i64,
    pub daily_time_minutes: i64,
    pub active_days: Vec<u32>,
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_time_hours: 6,
            daily_time_minutes: 0,
            // Monday to Friday
            active_days: vec![1, 2, 3, 4, 5],
            dark_mode: false,
        }
    }
}

impl Settings {
    /// The daily allowance in minutes.
    #[must_use]
    pub const fn daily_minutes(&self) -> i64 {
        self.daily_time_hours * 60 + self.daily_time_minutes
    }

    /// Whether the given calendar day accrues the daily allowance.
    #[must_use]
    pub fn is_active_day(&self, date: NaiveDate) -> bool {
        self.active_days
            .contains(&date.weekday().num_days_from_sunday())
    }

    /// Clamps all fields into their valid ranges: hours to `[0, 24]`,
    /// minutes to `[0, 59]`, active days deduplicated within `[0, 6]`.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.daily_time_hours = self.daily_time_hours.clamp(0, 24);
        self.daily_time_minutes = self.daily_time_minutes.clamp(0, 59);
        self.active_days.retain(|d| *d <= 6);
        self.active_days.sort_unstable();
        self.active_days.dedup();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_six_hours_weekdays() {
        let settings = Settings::default();
        assert_eq!(settings.daily_minutes(), 360);
        assert_eq!(settings.active_days, vec![1, 2, 3, 4, 5]);
        assert!(!settings.dark_mode);
    }

    #[test]
    fn active_day_uses_sunday_zero_numbering() {
        let settings = Settings::default();
        // 2025-06-16 is a Monday, 2025-06-15 a Sunday.
        assert!(settings.is_active_day(NaiveDate::from_ymd_opt(2025, 6, 16).unwrap()));
        assert!(!settings.is_active_day(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()));
    }

    #[test]
    fn clamped_constrains_all_fields() {
        let settings = Settings {
            daily_time_hours: 30,
            daily_time_minutes: -5,
            active_days: vec![6, 1, 9, 1],
            dark_mode: true,
        }
        .clamped();
        assert_eq!(settings.daily_time_hours, 24);
        assert_eq!(settings.daily_time_minutes, 0);
        assert_eq!(settings.active_days, vec![1, 6]);
    }

    #[test]
    fn deserializes_missing_fields_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"dailyTimeHours":2}"#).unwrap();
        assert_eq!(settings.daily_time_hours, 2);
        assert_eq!(settings.daily_time_minutes, 0);
        assert_eq!(settings.active_days, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn serializes_with_compat_field_names() {
        let value = serde_json::to_value(Settings::default()).unwrap();
        assert!(value.get("dailyTimeHours").is_some());
        assert!(value.get("dailyTimeMinutes").is_some());
        assert!(value.get("activeDays").is_some());
        assert!(value.get("darkMode").is_some());
    }
}

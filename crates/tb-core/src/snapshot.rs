//! Export snapshot document.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::event::TimerEvent;
use crate::ledger::TimeEntry;
use crate::settings::Settings;
use crate::timer::TimerState;

/// Everything persisted, bundled into one versioned export document.
///
/// Field names and nesting are a compatibility surface: if round-trip
/// import is ever added, this exact shape is what it must accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub settings: Settings,
    pub time_entries: Vec<TimeEntry>,
    pub timer_state: TimerState,
    pub timer_events: Vec<TimerEvent>,
    /// ISO-8601 instant the export was taken.
    pub export_date: String,
}

impl Snapshot {
    #[must_use]
    pub fn new(
        settings: Settings,
        time_entries: Vec<TimeEntry>,
        timer_state: TimerState,
        timer_events: Vec<TimerEvent>,
        now_ms: i64,
    ) -> Self {
        let export_date = DateTime::<Utc>::from_timestamp_millis(now_ms)
            .unwrap_or_default()
            .to_rfc3339_opts(SecondsFormat::Millis, true);
        Self {
            settings,
            time_entries,
            timer_state,
            timer_events,
            export_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;

    #[test]
    fn snapshot_round_trips_unchanged() {
        let snapshot = Snapshot::new(
            Settings::default(),
            vec![TimeEntry {
                id: "e1".to_string(),
                date: "2025-06-16".to_string(),
                added_minutes: 360,
                used_minutes: 400,
                balance: -40,
                last_updated: 1_750_000_000_000,
            }],
            TimerState {
                elapsed_time: 90,
                ..TimerState::default()
            },
            vec![TimerEvent::new(EventKind::Pause, 1_750_000_000_000, Some(90))],
            1_750_000_000_000,
        );

        let json = serde_json::to_string_pretty(&snapshot).unwrap();
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn snapshot_has_compat_top_level_fields() {
        let snapshot = Snapshot::new(
            Settings::default(),
            Vec::new(),
            TimerState::default(),
            Vec::new(),
            1_750_000_000_000,
        );
        let value = serde_json::to_value(&snapshot).unwrap();
        for field in [
            "settings",
            "timeEntries",
            "timerState",
            "timerEvents",
            "exportDate",
        ] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
        assert!(value["exportDate"].as_str().unwrap().starts_with("2025-"));
    }
}

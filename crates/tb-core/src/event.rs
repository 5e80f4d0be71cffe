//! Timer session events and the bounded event log.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of events retained in the log (oldest dropped first).
pub const MAX_EVENTS: usize = 100;

/// Kind of timer session event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Timer started from zero accumulated time.
    Start,
    /// A running segment ended.
    Pause,
    /// Timer started with time already accumulated.
    Resume,
}

impl EventKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Pause => "pause",
            Self::Resume => "resume",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "pause" => Ok(Self::Pause),
            "resume" => Ok(Self::Resume),
            _ => Err(format!("invalid event kind: {s}")),
        }
    }
}

/// One entry in the timer event log. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Instant the event occurred, epoch milliseconds. A synthetic pause
    /// appended by relaunch recovery is backdated to when the process was
    /// last seen alive.
    pub timestamp: i64,
    /// Length of the just-completed segment in seconds, present on pause.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_duration: Option<i64>,
}

impl TimerEvent {
    #[must_use]
    pub fn new(kind: EventKind, timestamp: i64, session_duration: Option<i64>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            timestamp,
            session_duration,
        }
    }
}

/// Append-only event log, newest last, FIFO-bounded at [`MAX_EVENTS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog(Vec<TimerEvent>);

impl EventLog {
    #[must_use]
    pub const fn new(events: Vec<TimerEvent>) -> Self {
        Self(events)
    }

    /// Appends an event, evicting the oldest entries beyond the cap.
    pub fn push(&mut self, event: TimerEvent) {
        self.0.push(event);
        if self.0.len() > MAX_EVENTS {
            let excess = self.0.len() - MAX_EVENTS;
            self.0.drain(..excess);
        }
    }

    #[must_use]
    pub fn events(&self) -> &[TimerEvent] {
        &self.0
    }

    #[must_use]
    pub fn into_events(self) -> Vec<TimerEvent> {
        self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_roundtrip() {
        for kind in [EventKind::Start, EventKind::Pause, EventKind::Resume] {
            let parsed: EventKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn event_kind_serde_matches_as_str() {
        for kind in [EventKind::Start, EventKind::Pause, EventKind::Resume] {
            let value = serde_json::to_value(kind).unwrap();
            assert_eq!(value.as_str().unwrap(), kind.as_str());
        }
    }

    #[test]
    fn event_kind_invalid() {
        assert!("stop".parse::<EventKind>().is_err());
    }

    #[test]
    fn event_serializes_with_compat_field_names() {
        let event = TimerEvent::new(EventKind::Pause, 1_000, Some(90));
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "pause");
        assert_eq!(value["timestamp"], 1_000);
        assert_eq!(value["sessionDuration"], 90);
    }

    #[test]
    fn event_omits_absent_session_duration() {
        let event = TimerEvent::new(EventKind::Start, 1_000, None);
        let value = serde_json::to_value(&event).unwrap();
        assert!(value.get("sessionDuration").is_none());
    }

    #[test]
    fn log_bounds_at_max_events() {
        let mut log = EventLog::default();
        for i in 0..i64::try_from(MAX_EVENTS).unwrap() + 1 {
            log.push(TimerEvent::new(EventKind::Start, i, None));
        }
        assert_eq!(log.len(), MAX_EVENTS);
        // Oldest (timestamp 0) was dropped; newest is last.
        assert_eq!(log.events().first().unwrap().timestamp, 1);
        assert_eq!(
            log.events().last().unwrap().timestamp,
            i64::try_from(MAX_EVENTS).unwrap()
        );
    }

    #[test]
    fn log_keeps_insertion_order_below_cap() {
        let mut log = EventLog::default();
        log.push(TimerEvent::new(EventKind::Start, 1, None));
        log.push(TimerEvent::new(EventKind::Pause, 2, Some(1)));
        assert_eq!(log.len(), 2);
        assert_eq!(log.events()[0].kind, EventKind::Start);
        assert_eq!(log.events()[1].kind, EventKind::Pause);
    }
}

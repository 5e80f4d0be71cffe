//! Timer engine: the running/paused state machine.
//!
//! Elapsed time is computed from wall-clock timestamps, never from counting
//! ticks, so a suspended process loses no time. Every transition is a pure
//! function over (`TimerState`, instant) returning a [`Transition`] that
//! carries the new state, the session event to append (if any), and the
//! usage to report to the ledger (if any). The orchestrating layer routes
//! the usage report; the engine never calls into the ledger.

use serde::{Deserialize, Serialize};

use crate::event::{EventKind, TimerEvent};

/// A persisted running state older than this is treated as an abandoned
/// session at relaunch. Shorter gaps count as continuous running.
pub const STALE_AFTER_MS: i64 = 5 * 60 * 1000;

/// Persisted timer state.
///
/// Invariant: `is_running` implies `start_time` is present, and
/// `elapsed_time` only covers completed segments. The current total while
/// running is `elapsed_time + (now - start_time)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimerState {
    pub is_running: bool,
    /// Instant the current running segment began, epoch ms. None when paused.
    pub start_time: Option<i64>,
    /// Accumulated seconds from completed segments only.
    pub elapsed_time: i64,
    /// Instant this state was last observed by a live process, epoch ms.
    #[serde(rename = "lastActiveTimestamp")]
    pub last_active: Option<i64>,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            is_running: false,
            start_time: None,
            elapsed_time: 0,
            last_active: None,
        }
    }
}

/// Whole minutes of newly elapsed running time to deduct from the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageReport {
    pub minutes: i64,
}

/// Result of a timer transition.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: TimerState,
    /// Session event to append to the log, if the transition produced one.
    pub event: Option<TimerEvent>,
    /// Usage to route to the ledger, reported at most once per transition.
    pub usage: Option<UsageReport>,
}

impl Transition {
    const fn unchanged(state: TimerState) -> Self {
        Self {
            state,
            event: None,
            usage: None,
        }
    }
}

/// Starts the timer. Calling while already running is a no-op.
#[must_use]
pub fn apply_start(state: TimerState, now_ms: i64) -> Transition {
    if state.is_running {
        return Transition::unchanged(state);
    }
    let kind = if state.elapsed_time == 0 {
        EventKind::Start
    } else {
        EventKind::Resume
    };
    Transition {
        event: Some(TimerEvent::new(kind, now_ms, None)),
        state: TimerState {
            is_running: true,
            start_time: Some(now_ms),
            last_active: Some(now_ms),
            ..state
        },
        usage: None,
    }
}

/// Pauses the timer, folding the open segment into `elapsed_time`.
///
/// The completed segment is reported to the ledger in whole minutes via
/// floor division; a sub-minute remainder stays in `elapsed_time` but is
/// never separately flushed. Calling while idle is a no-op.
#[must_use]
pub fn apply_pause(state: TimerState, now_ms: i64) -> Transition {
    let Some(start) = state.start_time.filter(|_| state.is_running) else {
        return Transition::unchanged(state);
    };
    let session_secs = (now_ms - start) / 1000;
    let minutes = session_secs / 60;
    Transition {
        state: TimerState {
            is_running: false,
            start_time: None,
            elapsed_time: state.elapsed_time + session_secs,
            last_active: Some(now_ms),
        },
        event: Some(TimerEvent::new(EventKind::Pause, now_ms, Some(session_secs))),
        usage: (minutes >= 1).then_some(UsageReport { minutes }),
    }
}

/// Zeroes the timer without touching the ledger history or event log.
///
/// A running session is closed out first: the current total including
/// time accumulated from completed segments is booked in whole minutes.
/// Resetting while idle discards the accumulated seconds unbooked, since
/// their whole minutes were already reported at each pause.
#[must_use]
pub fn apply_reset(state: TimerState, now_ms: i64) -> Transition {
    let usage = state
        .start_time
        .filter(|_| state.is_running)
        .map(|_| current_elapsed(&state, now_ms) / 60)
        .filter(|minutes| *minutes >= 1)
        .map(|minutes| UsageReport { minutes });
    Transition {
        state: TimerState {
            is_running: false,
            start_time: None,
            elapsed_time: 0,
            last_active: Some(now_ms),
        },
        event: None,
        usage,
    }
}

/// Pauses if running, starts otherwise.
#[must_use]
pub fn toggle(state: TimerState, now_ms: i64) -> Transition {
    if state.is_running {
        apply_pause(state, now_ms)
    } else {
        apply_start(state, now_ms)
    }
}

/// Total elapsed seconds including the open segment. Pure read, safe to
/// call every second.
#[must_use]
pub fn current_elapsed(state: &TimerState, now_ms: i64) -> i64 {
    match state.start_time.filter(|_| state.is_running) {
        Some(start) => state.elapsed_time + (now_ms - start) / 1000,
        None => state.elapsed_time,
    }
}

/// Refreshes `last_active` without touching anything else. This is the
/// once-per-second tick that keeps the relaunch staleness signal accurate.
#[must_use]
pub fn stamp(state: TimerState, now_ms: i64) -> TimerState {
    TimerState {
        last_active: Some(now_ms),
        ..state
    }
}

/// Reconciles a persisted state against the clock at process start.
///
/// A state left running within [`STALE_AFTER_MS`] of its last observation
/// is treated as continuous running and merely restamped. Beyond the
/// window the session is considered abandoned: the open segment's full
/// span is folded into `elapsed_time`, a synthetic pause is appended
/// backdated to the last observation, and the unobserved portion
/// (`now - last_active`) is reported as usage.
#[must_use]
pub fn recover(state: TimerState, now_ms: i64) -> Transition {
    if !state.is_running {
        return Transition::unchanged(stamp(state, now_ms));
    }
    let Some(start) = state.start_time else {
        // Running without a start instant violates the state invariant;
        // settle to idle keeping the accumulated time.
        tracing::warn!("running timer state had no start time, resetting to idle");
        return Transition::unchanged(TimerState {
            is_running: false,
            last_active: Some(now_ms),
            ..state
        });
    };
    let Some(last_active) = state.last_active else {
        // No observation to judge staleness by; assume still running.
        return Transition::unchanged(stamp(state, now_ms));
    };
    if now_ms - last_active <= STALE_AFTER_MS {
        return Transition::unchanged(stamp(state, now_ms));
    }

    let open_segment_secs = (now_ms - start) / 1000;
    let session_secs = (now_ms - last_active) / 1000;
    let minutes = session_secs / 60;
    tracing::debug!(
        open_segment_secs,
        session_secs,
        "recovered abandoned running session"
    );
    Transition {
        state: TimerState {
            is_running: false,
            start_time: None,
            elapsed_time: state.elapsed_time + open_segment_secs,
            last_active: Some(now_ms),
        },
        event: Some(TimerEvent::new(
            EventKind::Pause,
            last_active,
            Some(session_secs),
        )),
        usage: (minutes >= 1).then_some(UsageReport { minutes }),
    }
}

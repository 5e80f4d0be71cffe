//! End-to-end tests for the full timer/ledger flow.
//!
//! Drives the application wrapper directly over a store on disk with a
//! manual clock, covering persistence across "process restarts" and the
//! relaunch recovery paths.

use std::path::Path;

use tempfile::TempDir;

use tb_cli::App;
use tb_core::{EventKind, ManualClock};
use tb_store::Store;

// 2025-06-16T12:00:00Z, a Monday (active day under default settings).
const MONDAY_NOON: i64 = 1_750_075_200_000;
const MINUTE: i64 = 60 * 1000;

fn open_app(dir: &Path, now_ms: i64) -> App<ManualClock> {
    let store = Store::open(&dir.join("tb.db"));
    App::load(store, ManualClock::new(now_ms))
}

#[test]
fn session_books_usage_and_survives_restart() {
    let temp = TempDir::new().unwrap();

    let mut app = open_app(temp.path(), MONDAY_NOON);
    // Daily accrual ran at load.
    assert_eq!(app.ledger.balance_for("2025-06-16"), 360);

    app.start();
    app.clock().advance(10 * MINUTE);
    app.pause();
    assert_eq!(app.ledger.balance_for("2025-06-16"), 350);
    drop(app);

    // New process a minute later sees the same state.
    let app = open_app(temp.path(), MONDAY_NOON + 11 * MINUTE);
    assert!(!app.timer.is_running);
    assert_eq!(app.timer.elapsed_time, 600);
    let entry = app.ledger.entry_for("2025-06-16").unwrap();
    assert_eq!(entry.used_minutes, 10);
    assert_eq!(entry.balance, 350);

    let events = app.events.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind, EventKind::Start);
    assert_eq!(events[1].kind, EventKind::Pause);
    assert_eq!(events[1].session_duration, Some(600));
}

#[test]
fn restart_within_grace_window_keeps_running() {
    let temp = TempDir::new().unwrap();

    let mut app = open_app(temp.path(), MONDAY_NOON);
    app.start();
    drop(app);

    // Back 4 minutes later: treated as continuous running.
    let app = open_app(temp.path(), MONDAY_NOON + 4 * MINUTE);
    assert!(app.timer.is_running);
    assert_eq!(app.timer.start_time, Some(MONDAY_NOON));
    assert_eq!(app.current_elapsed(), 240);
    // Only the original start event; no synthetic pause.
    assert_eq!(app.events.len(), 1);
    let entry = app.ledger.entry_for("2025-06-16").unwrap();
    assert_eq!(entry.used_minutes, 0);
}

#[test]
fn restart_after_stale_session_settles_and_books_usage() {
    let temp = TempDir::new().unwrap();

    let mut app = open_app(temp.path(), MONDAY_NOON);
    app.start();
    drop(app);

    // Back 20 minutes later: the session was abandoned.
    let app = open_app(temp.path(), MONDAY_NOON + 20 * MINUTE);
    assert!(!app.timer.is_running);
    assert_eq!(app.timer.elapsed_time, 1200);

    let entry = app.ledger.entry_for("2025-06-16").unwrap();
    assert_eq!(entry.used_minutes, 20);
    assert_eq!(entry.balance, 340);

    // Synthetic pause backdated to the last liveness stamp.
    let events = app.events.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].kind, EventKind::Pause);
    assert_eq!(events[1].timestamp, MONDAY_NOON);
    assert_eq!(events[1].session_duration, Some(1200));
}

#[test]
fn ticking_extends_the_grace_window() {
    let temp = TempDir::new().unwrap();

    let mut app = open_app(temp.path(), MONDAY_NOON);
    app.start();
    // The watch loop keeps stamping while the process lives.
    app.clock().advance(30 * MINUTE);
    app.tick();
    drop(app);

    // Killed right after a tick; 4 minutes later the session continues.
    let app = open_app(temp.path(), MONDAY_NOON + 34 * MINUTE);
    assert!(app.timer.is_running);
    assert_eq!(app.current_elapsed(), 34 * 60);
}

#[test]
fn accrual_happens_once_per_active_day() {
    let temp = TempDir::new().unwrap();

    let app = open_app(temp.path(), MONDAY_NOON);
    assert_eq!(app.ledger.balance_for("2025-06-16"), 360);
    drop(app);

    // Same day again: no double accrual.
    let app = open_app(temp.path(), MONDAY_NOON + 60 * MINUTE);
    assert_eq!(app.ledger.balance_for("2025-06-16"), 360);
    assert_eq!(app.ledger.entries().len(), 1);
    drop(app);

    // Next day (Tuesday): a fresh entry accrues, Monday's is untouched.
    let app = open_app(temp.path(), MONDAY_NOON + 24 * 60 * MINUTE);
    assert_eq!(app.ledger.balance_for("2025-06-17"), 360);
    assert_eq!(app.ledger.balance_for("2025-06-16"), 360);
}

#[test]
fn overdraft_carry_over_survives_restart() {
    let temp = TempDir::new().unwrap();

    let mut app = open_app(temp.path(), MONDAY_NOON);
    app.start();
    app.clock().advance(400 * MINUTE);
    app.pause();
    drop(app);

    let app = open_app(temp.path(), MONDAY_NOON + 401 * MINUTE);
    assert_eq!(app.ledger.balance_for("2025-06-16"), -40);
    assert_eq!(app.ledger.balance_for("2025-06-17"), 40);
}

#[test]
fn export_reflects_persisted_state() {
    let temp = TempDir::new().unwrap();

    let mut app = open_app(temp.path(), MONDAY_NOON);
    app.start();
    app.clock().advance(5 * MINUTE);
    app.pause();

    let snapshot = app.snapshot();
    assert_eq!(snapshot.settings, app.settings);
    assert_eq!(snapshot.time_entries, app.ledger.entries());
    assert_eq!(snapshot.timer_state, app.timer);
    assert_eq!(snapshot.timer_events, app.events.events());

    // The same values a fresh process would load.
    drop(app);
    let reopened = open_app(temp.path(), MONDAY_NOON + 6 * MINUTE);
    assert_eq!(snapshot.time_entries, reopened.ledger.entries());
    assert_eq!(snapshot.settings, reopened.settings);
}

#[test]
fn timer_reset_zeroes_elapsed_and_survives_restart() {
    let temp = TempDir::new().unwrap();

    let mut app = open_app(temp.path(), MONDAY_NOON);
    app.start();
    app.clock().advance(12 * MINUTE);
    let usage = app.reset_timer();
    assert_eq!(usage.unwrap().minutes, 12);
    assert_eq!(app.current_elapsed(), 0);
    assert_eq!(app.ledger.balance_for("2025-06-16"), 360 - 12);
    drop(app);

    let mut app = open_app(temp.path(), MONDAY_NOON + 20 * MINUTE);
    assert!(!app.timer.is_running);
    assert_eq!(app.timer.elapsed_time, 0);
    assert_eq!(app.ledger.balance_for("2025-06-16"), 348);

    // With the clock back at zero, the next start is a fresh session.
    app.start();
    assert_eq!(app.events.events().last().unwrap().kind, EventKind::Start);
}

#[test]
fn reset_clears_the_store_for_future_processes() {
    let temp = TempDir::new().unwrap();

    let mut app = open_app(temp.path(), MONDAY_NOON);
    app.start();
    app.clock().advance(MINUTE);
    app.pause();
    app.reset().unwrap();
    drop(app);

    // A Sunday load: nothing accrues, nothing lingers.
    let sunday = MONDAY_NOON - 24 * 60 * MINUTE;
    let app = open_app(temp.path(), sunday);
    assert!(app.ledger.entries().is_empty());
    assert!(app.events.is_empty());
    assert_eq!(app.timer.elapsed_time, 0);
}

//! Status command: timer state, today's entry, settings summary.

use std::io::Write;

use anyhow::Result;

use tb_core::{Clock, format};

use crate::App;

pub fn run<W: Write, C: Clock>(writer: &mut W, app: &App<C>) -> Result<()> {
    let state = if app.timer.is_running {
        "running"
    } else {
        "paused"
    };
    writeln!(writer, "Timer: {state}")?;
    writeln!(writer, "Elapsed: {}", format::hms(app.current_elapsed()))?;

    let today = app.today_string();
    match app.ledger.entry_for(&today) {
        Some(entry) => writeln!(
            writer,
            "Today ({today}): added {}m, used {}m, balance {}",
            entry.added_minutes,
            entry.used_minutes,
            format::signed_minutes(entry.balance)
        )?,
        None => writeln!(writer, "Today ({today}): no entry")?,
    }

    writeln!(
        writer,
        "Allowance: {} on {}",
        format::signed_minutes(app.settings.daily_minutes()),
        format::active_days_text(&app.settings.active_days)
    )?;

    if !app.is_persistent() {
        writeln!(writer, "Warning: store unavailable, changes will not persist")?;
    }

    Ok(())
}

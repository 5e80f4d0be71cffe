//! Start, pause, and toggle commands.

use std::io::Write;

use anyhow::Result;

use tb_core::{Clock, format};

use crate::App;

pub fn start<W: Write, C: Clock>(writer: &mut W, app: &mut App<C>) -> Result<()> {
    if app.timer.is_running {
        writeln!(writer, "Timer already running.")?;
        return Ok(());
    }
    app.start();
    writeln!(
        writer,
        "Timer started ({} accumulated).",
        format::hms(app.current_elapsed())
    )?;
    Ok(())
}

pub fn pause<W: Write, C: Clock>(writer: &mut W, app: &mut App<C>) -> Result<()> {
    if !app.timer.is_running {
        writeln!(writer, "Timer is not running.")?;
        return Ok(());
    }
    let usage = app.pause();
    writeln!(
        writer,
        "Timer paused at {}.",
        format::hms(app.current_elapsed())
    )?;
    if let Some(usage) = usage {
        let today = app.today_string();
        writeln!(
            writer,
            "Booked {}m; today's balance is {}.",
            usage.minutes,
            format::signed_minutes(app.ledger.balance_for(&today))
        )?;
    }
    Ok(())
}

pub fn toggle<W: Write, C: Clock>(writer: &mut W, app: &mut App<C>) -> Result<()> {
    if app.timer.is_running {
        pause(writer, app)
    } else {
        start(writer, app)
    }
}

pub fn reset<W: Write, C: Clock>(writer: &mut W, app: &mut App<C>) -> Result<()> {
    let before = format::hms(app.current_elapsed());
    let usage = app.reset_timer();
    writeln!(writer, "Timer reset from {before}.")?;
    if let Some(usage) = usage {
        let today = app.today_string();
        writeln!(
            writer,
            "Booked {}m; today's balance is {}.",
            usage.minutes,
            format::signed_minutes(app.ledger.balance_for(&today))
        )?;
    }
    Ok(())
}

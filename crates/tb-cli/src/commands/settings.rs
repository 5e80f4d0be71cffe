//! Settings command: show or replace the daily allowance schedule.

use std::io::Write;

use anyhow::Result;

use tb_core::{Clock, format};

use crate::App;

pub fn run<W: Write, C: Clock>(
    writer: &mut W,
    app: &mut App<C>,
    hours: Option<i64>,
    minutes: Option<i64>,
    days: Option<Vec<u32>>,
    dark_mode: Option<bool>,
) -> Result<()> {
    let changed = hours.is_some() || minutes.is_some() || days.is_some() || dark_mode.is_some();
    if changed {
        let mut settings = app.settings.clone();
        if let Some(hours) = hours {
            settings.daily_time_hours = hours;
        }
        if let Some(minutes) = minutes {
            settings.daily_time_minutes = minutes;
        }
        if let Some(days) = days {
            settings.active_days = days;
        }
        if let Some(dark_mode) = dark_mode {
            settings.dark_mode = dark_mode;
        }
        // Out-of-range values are clamped inside update_settings.
        app.update_settings(settings);
        writeln!(writer, "Settings updated.")?;
    }

    let settings = &app.settings;
    writeln!(
        writer,
        "Daily allowance: {} on {}",
        format::signed_minutes(settings.daily_minutes()),
        format::active_days_text(&settings.active_days)
    )?;
    writeln!(writer, "Dark mode: {}", settings.dark_mode)?;
    Ok(())
}

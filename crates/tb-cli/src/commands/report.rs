//! Report command: the day-by-day balance ledger.

use std::io::Write;

use anyhow::Result;

use tb_core::{Clock, format};

use crate::App;

pub fn run<W: Write, C: Clock>(writer: &mut W, app: &App<C>, json: bool) -> Result<()> {
    let entries = app.ledger.sorted();

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&entries)?)?;
        return Ok(());
    }

    if entries.is_empty() {
        writeln!(writer, "No entries recorded.")?;
        return Ok(());
    }

    writeln!(
        writer,
        "{:<12} {:>7} {:>7} {:>8}",
        "Date", "Added", "Used", "Balance"
    )?;
    for entry in &entries {
        writeln!(
            writer,
            "{:<12} {:>6}m {:>6}m {:>8}",
            entry.date,
            entry.added_minutes,
            entry.used_minutes,
            format::signed_minutes(entry.balance)
        )?;
    }
    Ok(())
}

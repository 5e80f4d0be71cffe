//! Edit command: manual balance adjustment for one day.

use std::io::Write;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use tb_core::{Clock, format};

use crate::App;

pub fn run<W: Write, C: Clock>(
    writer: &mut W,
    app: &mut App<C>,
    date: &str,
    adjust: Option<i64>,
    set: Option<i64>,
) -> Result<()> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("invalid date: {date} (expected YYYY-MM-DD)"))?;

    let balance = match (adjust, set) {
        (Some(delta), None) => app.adjust_balance(date, delta),
        (None, Some(target)) => app.set_balance(date, target),
        _ => bail!("pass exactly one of --adjust or --set"),
    };

    writeln!(
        writer,
        "{date} balance is now {}",
        format::signed_minutes(balance)
    )?;
    Ok(())
}

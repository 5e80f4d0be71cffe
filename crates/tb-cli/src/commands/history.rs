//! History command: the timer event log, newest first.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Local, Utc};

use tb_core::{Clock, EventKind, format};

use crate::App;

pub fn run<W: Write, C: Clock>(
    writer: &mut W,
    app: &App<C>,
    limit: usize,
    kind: Option<EventKind>,
) -> Result<()> {
    let mut shown = 0;
    for event in app
        .events
        .events()
        .iter()
        .rev()
        .filter(|event| kind.is_none_or(|kind| event.kind == kind))
        .take(limit)
    {
        shown += 1;
        match event.session_duration {
            Some(secs) => writeln!(
                writer,
                "{}  {:<6} session {}",
                local_timestamp(event.timestamp),
                event.kind,
                format::hms(secs)
            )?,
            None => writeln!(
                writer,
                "{}  {}",
                local_timestamp(event.timestamp),
                event.kind
            )?,
        }
    }
    if shown == 0 {
        writeln!(writer, "No timer events recorded.")?;
    }
    Ok(())
}

fn local_timestamp(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms).map_or_else(
        || "-".to_string(),
        |dt| {
            DateTime::<Local>::from(dt)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        },
    )
}

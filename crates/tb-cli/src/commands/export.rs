//! Export command: JSON snapshot of everything persisted.

use std::io::Write;

use anyhow::Result;

use tb_core::Clock;

use crate::App;

pub fn run<W: Write, C: Clock>(writer: &mut W, app: &App<C>) -> Result<()> {
    let snapshot = app.snapshot();
    writeln!(writer, "{}", serde_json::to_string_pretty(&snapshot)?)?;
    Ok(())
}

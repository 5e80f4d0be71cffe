//! Reset command: clear all data and reinitialize defaults.

use std::io::Write;

use anyhow::{Context, Result};

use tb_core::Clock;

use crate::App;

pub fn run<W: Write, C: Clock>(writer: &mut W, app: &mut App<C>, yes: bool) -> Result<()> {
    if !yes {
        writeln!(
            writer,
            "This deletes all timebank data. Re-run with --yes to confirm."
        )?;
        return Ok(());
    }

    app.reset().context("failed to clear the store")?;
    writeln!(writer, "All data cleared; settings reset to defaults.")?;
    Ok(())
}

//! Foreground timer display, ticking once per second.
//!
//! Each tick re-persists the timer state with a refreshed liveness stamp
//! so relaunch recovery can tell a brief suspension from an abandoned
//! session. The displayed elapsed time is recomputed from the start
//! instant every iteration, so suspended ticking self-corrects.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;

use tb_core::{Clock, format};

use crate::App;

pub fn run<W: Write, C: Clock>(
    writer: &mut W,
    app: &mut App<C>,
    duration: Option<u64>,
) -> Result<()> {
    if !app.timer.is_running {
        writeln!(writer, "Timer is not running.")?;
        return Ok(());
    }

    let mut remaining = duration;
    loop {
        app.tick();
        write!(writer, "\r{}", format::hms(app.current_elapsed()))?;
        writer.flush()?;

        if let Some(secs) = remaining.as_mut() {
            if *secs == 0 {
                break;
            }
            *secs -= 1;
        }
        std::thread::sleep(Duration::from_secs(1));
    }
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tb_core::ManualClock;
    use tb_store::Store;

    const MONDAY_NOON: i64 = 1_750_075_200_000;

    #[test]
    fn watch_reports_idle_timer() {
        let mut app = App::load(Store::open_in_memory(), ManualClock::new(MONDAY_NOON));
        let mut output = Vec::new();
        run(&mut output, &mut app, Some(3)).unwrap();
        assert!(String::from_utf8(output).unwrap().contains("not running"));
    }

    #[test]
    fn watch_refreshes_liveness_stamp() {
        let mut app = App::load(Store::open_in_memory(), ManualClock::new(MONDAY_NOON));
        app.start();
        app.clock().advance(30 * 1000);

        let mut output = Vec::new();
        run(&mut output, &mut app, Some(0)).unwrap();

        assert_eq!(app.timer.last_active, Some(MONDAY_NOON + 30 * 1000));
        assert_eq!(app.timer.elapsed_time, 0, "ticking never accrues elapsed");
        assert!(String::from_utf8(output).unwrap().contains("0:00:30"));
    }
}

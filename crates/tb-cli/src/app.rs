//! The stateful application wrapper.
//!
//! [`App`] owns the single in-memory instance of every piece of state and
//! its persistence. The domain logic in `tb-core` is pure; this is the
//! boundary layer that reads the clock, routes usage reports from timer
//! transitions into the ledger, and writes back to the store after each
//! mutation.

use tb_core::{
    Clock, EventLog, Ledger, Settings, Snapshot, TimerState, Transition, UsageReport, format, timer,
};
use tb_store::{Store, StoreError};

pub struct App<C: Clock> {
    clock: C,
    store: Store,
    pub settings: Settings,
    pub ledger: Ledger,
    pub timer: TimerState,
    pub events: EventLog,
}

impl<C: Clock> App<C> {
    /// Loads all persisted state, reconciles a timer left running by a
    /// previous process, and accrues today's allowance if due.
    pub fn load(store: Store, clock: C) -> Self {
        let settings = store.load_settings();
        let ledger = store.load_ledger();
        let timer = store.load_timer_state();
        let events = store.load_events();
        let mut app = Self {
            clock,
            store,
            settings,
            ledger,
            timer,
            events,
        };

        let now = app.clock.now_ms();
        let recovery = timer::recover(app.timer.clone(), now);
        if recovery.usage.is_some() {
            tracing::info!("recovered an abandoned running session");
        }
        app.apply_transition(recovery);

        if app
            .ledger
            .ensure_daily_accrual(app.clock.today(), &app.settings, now)
        {
            tracing::debug!("accrued daily allowance");
            app.store.save_ledger(&app.ledger);
        }
        app
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Today's ledger key, always read from the live clock.
    pub fn today_string(&self) -> String {
        format::date_string(self.clock.today())
    }

    pub fn start(&mut self) -> Option<UsageReport> {
        let transition = timer::apply_start(self.timer.clone(), self.clock.now_ms());
        self.apply_transition(transition)
    }

    pub fn pause(&mut self) -> Option<UsageReport> {
        let transition = timer::apply_pause(self.timer.clone(), self.clock.now_ms());
        self.apply_transition(transition)
    }

    pub fn toggle(&mut self) -> Option<UsageReport> {
        let transition = timer::toggle(self.timer.clone(), self.clock.now_ms());
        self.apply_transition(transition)
    }

    /// Zeroes the timer, booking a running session's total first. The
    /// ledger and event log are untouched.
    pub fn reset_timer(&mut self) -> Option<UsageReport> {
        let transition = timer::apply_reset(self.timer.clone(), self.clock.now_ms());
        self.apply_transition(transition)
    }

    /// The once-per-second liveness stamp while running. Keeps the
    /// relaunch staleness signal accurate; touches nothing else.
    pub fn tick(&mut self) {
        if !self.timer.is_running {
            return;
        }
        self.timer = timer::stamp(self.timer.clone(), self.clock.now_ms());
        self.store.save_timer_state(&self.timer);
    }

    /// Total elapsed seconds including the open segment.
    pub fn current_elapsed(&self) -> i64 {
        timer::current_elapsed(&self.timer, self.clock.now_ms())
    }

    /// Adds signed minutes to a day's balance, creating the entry if
    /// absent. Returns the new balance.
    pub fn adjust_balance(&mut self, date: &str, delta: i64) -> i64 {
        let now = self.clock.now_ms();
        let id = self.ledger.ensure_entry(date, now).id.clone();
        self.ledger.edit_entry(&id, delta, now);
        self.store.save_ledger(&self.ledger);
        self.ledger.balance_for(date)
    }

    /// Sets a day's balance to an absolute value, expressed internally as
    /// a delta from the current balance.
    pub fn set_balance(&mut self, date: &str, target: i64) -> i64 {
        let now = self.clock.now_ms();
        let current = self.ledger.ensure_entry(date, now).balance;
        self.adjust_balance(date, target - current)
    }

    /// Replaces settings wholesale, clamping out-of-range input at this
    /// boundary. Past entries are not recomputed.
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings.clamped();
        self.store.save_settings(&self.settings);
    }

    /// Clears every persisted key and reinitializes defaults. Fails
    /// without touching in-memory state if the store cannot be cleared.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.store.reset()?;
        self.settings = Settings::default();
        self.ledger = Ledger::default();
        self.timer = TimerState::default();
        self.events = EventLog::default();
        Ok(())
    }

    /// A point-in-time export of everything persisted. Read-only.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.settings.clone(),
            self.ledger.entries().to_vec(),
            self.timer.clone(),
            self.events.events().to_vec(),
            self.clock.now_ms(),
        )
    }

    pub fn is_persistent(&self) -> bool {
        self.store.is_persistent()
    }

    /// Commits a timer transition: the new state always persists, the
    /// session event (if any) is appended to the bounded log, and the
    /// usage report (if any) is booked against today's ledger entry.
    fn apply_transition(&mut self, transition: Transition) -> Option<UsageReport> {
        let Transition {
            state,
            event,
            usage,
        } = transition;
        self.timer = state;
        self.store.save_timer_state(&self.timer);
        if let Some(event) = event {
            self.events.push(event);
            self.store.save_events(&self.events);
        }
        if let Some(usage) = usage {
            self.ledger
                .record_usage(usage.minutes, self.clock.today(), self.clock.now_ms());
            self.store.save_ledger(&self.ledger);
        }
        usage
    }
}

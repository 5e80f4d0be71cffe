//! Key-value persistence layer for timebank.
//!
//! The store is a fixed namespace of four keys, each holding one JSON
//! document: settings, the time-entry collection, timer state, and the
//! timer event log. Backing storage is a single sqlite `kv` table.
//!
//! # Degraded mode
//!
//! Persistence is best-effort by contract: if the database cannot be
//! opened, or a write fails mid-session, the store falls back to an
//! in-memory map for the remainder of the session. Reads and writes never
//! panic and never surface storage errors to the typed API; losing
//! persisted state is acceptable, crashing is not. Malformed or missing
//! documents load as their documented defaults.
//!
//! # Thread Safety
//!
//! [`Store`] wraps a `rusqlite::Connection`, which is `Send` but not
//! `Sync`; wrap it in a `Mutex` for shared access. All callers in this
//! workspace are single-threaded.

use std::collections::HashMap;
use std::path::Path;

use rusqlite::{Connection, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use tb_core::{EventLog, Ledger, Settings, TimerState};

/// The fixed key namespace. Names match the original persisted documents.
pub mod keys {
    pub const SETTINGS: &str = "timetracker_settings";
    pub const TIME_ENTRIES: &str = "timetracker_entries";
    pub const TIMER_STATE: &str = "timetracker_timer";
    pub const TIMER_EVENTS: &str = "timetracker_events";

    pub const ALL: [&str; 4] = [SETTINGS, TIME_ENTRIES, TIMER_STATE, TIMER_EVENTS];
}

/// Storage errors. Only [`Store::clear_all`] and [`Store::reset`] surface
/// these; routine reads and writes mask failures by degrading.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

enum Backend {
    Sqlite(Connection),
    Memory(HashMap<String, String>),
}

/// Key-value store with an in-memory fallback.
pub struct Store {
    backend: Backend,
}

impl Store {
    /// Opens a store at the given path, creating the database if needed.
    ///
    /// Falls back to a non-persistent in-memory store if the database
    /// cannot be opened; that degradation is logged, not returned.
    #[must_use]
    pub fn open(path: &Path) -> Self {
        match Connection::open(path).and_then(|conn| {
            init_schema(&conn)?;
            Ok(conn)
        }) {
            Ok(conn) => Self {
                backend: Backend::Sqlite(conn),
            },
            Err(error) => {
                tracing::warn!(%error, path = %path.display(), "store unavailable, using in-memory fallback");
                Self::ephemeral()
            }
        }
    }

    /// Opens an in-memory sqlite store, destroyed on drop. For tests.
    #[must_use]
    pub fn open_in_memory() -> Self {
        match Connection::open_in_memory().and_then(|conn| {
            init_schema(&conn)?;
            Ok(conn)
        }) {
            Ok(conn) => Self {
                backend: Backend::Sqlite(conn),
            },
            Err(error) => {
                tracing::warn!(%error, "in-memory database unavailable, using map fallback");
                Self::ephemeral()
            }
        }
    }

    /// A store with no backing database at all: the degraded mode.
    #[must_use]
    pub fn ephemeral() -> Self {
        Self {
            backend: Backend::Memory(HashMap::new()),
        }
    }

    /// Whether writes currently reach durable storage.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        matches!(self.backend, Backend::Sqlite(_))
    }

    /// Reads a raw value. Absent keys and read failures both yield `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match &self.backend {
            Backend::Sqlite(conn) => {
                match conn.query_row(
                    "SELECT value FROM kv WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                ) {
                    Ok(value) => Some(value),
                    Err(rusqlite::Error::QueryReturnedNoRows) => None,
                    Err(error) => {
                        tracing::warn!(%error, key, "kv read failed");
                        None
                    }
                }
            }
            Backend::Memory(map) => map.get(key).cloned(),
        }
    }

    /// Writes a raw value. A database failure degrades the store to
    /// memory (seeded with whatever is still readable) and retries there.
    pub fn set(&mut self, key: &str, value: &str) {
        if let Backend::Sqlite(conn) = &self.backend {
            let result = conn.execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            );
            match result {
                Ok(_) => return,
                Err(error) => {
                    tracing::warn!(%error, key, "kv write failed, degrading to in-memory store");
                    self.degrade();
                }
            }
        }
        if let Backend::Memory(map) = &mut self.backend {
            map.insert(key.to_string(), value.to_string());
        }
    }

    /// Removes a key. Failures degrade like [`Store::set`].
    pub fn remove(&mut self, key: &str) {
        if let Backend::Sqlite(conn) = &self.backend {
            match conn.execute("DELETE FROM kv WHERE key = ?1", params![key]) {
                Ok(_) => return,
                Err(error) => {
                    tracing::warn!(%error, key, "kv delete failed, degrading to in-memory store");
                    self.degrade();
                }
            }
        }
        if let Backend::Memory(map) = &mut self.backend {
            map.remove(key);
        }
    }

    /// Clears every key. Unlike routine writes this surfaces failure, so
    /// a reset can be reported to the user instead of half-applied.
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        match &mut self.backend {
            Backend::Sqlite(conn) => {
                conn.execute("DELETE FROM kv", [])?;
            }
            Backend::Memory(map) => map.clear(),
        }
        Ok(())
    }

    /// Clears every key, then reinitializes default settings. All keys are
    /// gone before this reports success.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.clear_all()?;
        self.save_settings(&Settings::default());
        Ok(())
    }

    // Typed documents. Loads substitute defaults for absent or malformed
    // values; saves serialize back under the fixed keys.

    #[must_use]
    pub fn load_settings(&self) -> Settings {
        self.get_json(keys::SETTINGS)
    }

    pub fn save_settings(&mut self, settings: &Settings) {
        self.set_json(keys::SETTINGS, settings);
    }

    #[must_use]
    pub fn load_ledger(&self) -> Ledger {
        self.get_json(keys::TIME_ENTRIES)
    }

    pub fn save_ledger(&mut self, ledger: &Ledger) {
        self.set_json(keys::TIME_ENTRIES, ledger);
    }

    #[must_use]
    pub fn load_timer_state(&self) -> TimerState {
        self.get_json(keys::TIMER_STATE)
    }

    pub fn save_timer_state(&mut self, state: &TimerState) {
        self.set_json(keys::TIMER_STATE, state);
    }

    #[must_use]
    pub fn load_events(&self) -> EventLog {
        self.get_json(keys::TIMER_EVENTS)
    }

    pub fn save_events(&mut self, events: &EventLog) {
        self.set_json(keys::TIMER_EVENTS, events);
    }

    fn get_json<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let Some(raw) = self.get(key) else {
            return T::default();
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(%error, key, "malformed persisted document, using defaults");
                T::default()
            }
        }
    }

    fn set_json<T: Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.set(key, &json),
            Err(error) => tracing::warn!(%error, key, "failed to serialize document"),
        }
    }

    /// Swaps to the in-memory backend, seeded with whatever rows are
    /// still readable from the database.
    fn degrade(&mut self) {
        let mut map = HashMap::new();
        if let Backend::Sqlite(conn) = &self.backend {
            if let Ok(mut stmt) = conn.prepare("SELECT key, value FROM kv") {
                let rows = stmt.query_map([], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                });
                if let Ok(rows) = rows {
                    for (key, value) in rows.flatten() {
                        map.insert(key, value);
                    }
                }
            }
        }
        self.backend = Backend::Memory(map);
    }
}

fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )
}

//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database. The engine calls store
//! methods; no other module executes SQL. The game state itself is
//! persisted as one versioned JSON blob — the schema gate and the
//! merge-over-defaults migration live in [`crate::state::restore`].

use crate::{error::GameResult, event::EventLogEntry};
use rusqlite::{params, Connection, OptionalExtension};

const SAVE_SLOT: &str = "default";

pub struct GameStore {
    conn: Connection,
}

impl GameStore {
    /// Open (or create) the save database at `path`.
    pub fn open(path: &str) -> GameResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only matters for real files; :memory: ignores it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> GameResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> GameResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    // ── Save blob ──────────────────────────────────────────────

    pub fn save_state(&self, schema_version: u32, state_json: &str) -> GameResult<()> {
        self.conn.execute(
            "INSERT INTO save (slot, schema_version, state_json, saved_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(slot) DO UPDATE SET
                 schema_version = excluded.schema_version,
                 state_json     = excluded.state_json,
                 saved_at       = excluded.saved_at",
            params![
                SAVE_SLOT,
                schema_version,
                state_json,
                chrono::Utc::now().to_rfc3339()
            ],
        )?;
        Ok(())
    }

    /// The persisted blob and its schema version, if any save exists.
    pub fn load_state(&self) -> GameResult<Option<(u32, String)>> {
        let row = self
            .conn
            .query_row(
                "SELECT schema_version, state_json FROM save WHERE slot = ?1",
                params![SAVE_SLOT],
                |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;
        Ok(row)
    }

    // ── Event log ──────────────────────────────────────────────

    pub fn append_event(&self, entry: &EventLogEntry) -> GameResult<()> {
        self.conn.execute(
            "INSERT INTO event_log (occurred_at, event_type, payload)
             VALUES (?1, ?2, ?3)",
            params![
                entry.occurred_at.to_rfc3339(),
                entry.event_type,
                entry.payload
            ],
        )?;
        Ok(())
    }

    pub fn event_count(&self) -> GameResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM event_log", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn events_of_type(&self, event_type: &str) -> GameResult<Vec<EventLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, occurred_at, event_type, payload
             FROM event_log WHERE event_type = ?1
             ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map(params![event_type], |row| {
                let occurred_at: String = row.get(1)?;
                Ok((row.get::<_, i64>(0)?, occurred_at, row.get::<_, String>(3)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries
            .into_iter()
            .map(|(id, occurred_at, payload)| EventLogEntry {
                id: Some(id),
                occurred_at: occurred_at
                    .parse()
                    .unwrap_or_else(|_| chrono::Utc::now()),
                event_type: event_type.to_string(),
                payload,
            })
            .collect())
    }
}

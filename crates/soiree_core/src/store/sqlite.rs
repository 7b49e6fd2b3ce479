//! SQLite-backed key-value store.
//!
//! # Responsibility
//! - Persist fallback cache entries in the `fallback_entries` table.
//!
//! # Invariants
//! - The connection must come from `db::open_db*` so the cache schema is current.
//! - Upserts replace the previous value and refresh `updated_at`.

use crate::store::kv::{KeyValueStore, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};

/// File-backed store borrowing one open connection.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get_raw(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM fallback_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO fallback_entries (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM fallback_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

//! Cache schema steps keyed by `PRAGMA user_version`.

use crate::store::kv::{StoreError, StoreResult};
use log::info;
use rusqlite::Connection;

/// Schema version written by this build.
pub const CACHE_SCHEMA_VERSION: u32 = 1;

/// Step `n` upgrades a cache stamped `n - 1` to `n`.
const STEPS: [(u32, &str); 1] = [(1, include_str!("sql/0001_fallback_entries.sql"))];

/// Reads the schema version stamped on `conn` (`0` for a fresh file).
pub fn schema_version(conn: &Connection) -> StoreResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Brings the cache schema up to [`CACHE_SCHEMA_VERSION`] in one transaction.
pub(super) fn ensure_schema(conn: &mut Connection) -> StoreResult<()> {
    let found = schema_version(conn)?;
    if found > CACHE_SCHEMA_VERSION {
        return Err(StoreError::SchemaTooNew {
            found,
            supported: CACHE_SCHEMA_VERSION,
        });
    }
    if found == CACHE_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, ddl) in STEPS.iter().filter(|(version, _)| *version > found) {
        tx.execute_batch(ddl)?;
        tx.pragma_update(None, "user_version", *version)?;
    }
    tx.commit()?;

    info!(
        "event=cache_schema module=db status=upgraded from={} to={}",
        found, CACHE_SCHEMA_VERSION
    );
    Ok(())
}

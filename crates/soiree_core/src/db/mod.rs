//! SQLite bootstrap for the device-local fallback cache.
//!
//! # Responsibility
//! - Open file or in-memory connections backing `SqliteKeyValueStore`.
//! - Stamp and upgrade the cache schema.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`.
//! - No cache row is read or written before the schema is current.
//! - A cache stamped by a newer build is refused, never downgraded.

mod open;
mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::{schema_version, CACHE_SCHEMA_VERSION};

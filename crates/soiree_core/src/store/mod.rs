//! Device-local storage behind the fallback cache.
//!
//! # Responsibility
//! - Define the injected key-value capability (`KeyValueStore`).
//! - Provide in-memory and SQLite-backed implementations.
//! - Layer the numeric fallback contract (`FallbackStore`) on top.
//!
//! # Invariants
//! - Storage is advisory: read failures and corrupt values surface as misses
//!   at the `FallbackStore` level, never as errors.

pub mod fallback;
pub mod kv;
pub mod sqlite;

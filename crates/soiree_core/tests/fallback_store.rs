use soiree_core::db::{open_db, open_db_in_memory};
use soiree_core::{
    FallbackConfig, FallbackStore, KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore,
    StoreError, StoreResult,
};

/// Store whose every operation fails, like a device with storage disabled.
struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get_raw(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::Unavailable("storage disabled".to_string()))
    }

    fn set_raw(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::Unavailable("quota exceeded".to_string()))
    }

    fn delete(&self, _key: &str) -> StoreResult<()> {
        Err(StoreError::Unavailable("storage disabled".to_string()))
    }
}

#[test]
fn memory_store_set_get_delete() {
    let fallback = FallbackStore::new(MemoryKeyValueStore::new());

    assert_eq!(fallback.get("W1"), None);
    fallback.set("W1", 1000.0);
    assert_eq!(fallback.get("W1"), Some(1000.0));
    fallback.set("W1", 2500.0);
    assert_eq!(fallback.get("W1"), Some(2500.0));

    fallback.delete("W1");
    assert_eq!(fallback.get("W1"), None);
}

#[test]
fn entries_are_scoped_per_collection() {
    let fallback = FallbackStore::new(MemoryKeyValueStore::new());
    fallback.set("W1", 10.0);
    fallback.set("W2", 20.0);

    fallback.delete("W1");

    assert_eq!(fallback.get("W1"), None);
    assert_eq!(fallback.get("W2"), Some(20.0));
}

#[test]
fn corrupted_entries_read_as_absent() {
    let store = MemoryKeyValueStore::new();
    store.set_raw("wallet-budget-W1", "not-a-number").unwrap();
    store.set_raw("wallet-budget-W2", "NaN").unwrap();
    let fallback = FallbackStore::new(store);

    assert_eq!(fallback.get("W1"), None);
    assert_eq!(fallback.get("W2"), None);
}

#[test]
fn storage_failures_are_swallowed() {
    let fallback = FallbackStore::new(UnavailableStore);

    fallback.set("W1", 1000.0);
    fallback.delete("W1");
    assert_eq!(fallback.get("W1"), None);
}

#[test]
fn sqlite_store_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fallback.db");

    {
        let conn = open_db(&path).unwrap();
        let fallback = FallbackStore::new(SqliteKeyValueStore::new(&conn));
        fallback.set("W1", 2500.0);
    }

    let conn = open_db(&path).unwrap();
    let fallback = FallbackStore::new(SqliteKeyValueStore::new(&conn));
    assert_eq!(fallback.get("W1"), Some(2500.0));

    let raw: String = conn
        .query_row(
            "SELECT value FROM fallback_entries WHERE key = 'wallet-budget-W1';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(raw, "2500");
}

#[test]
fn sqlite_store_honours_custom_prefix() {
    let conn = open_db_in_memory().unwrap();
    let fallback = FallbackStore::with_config(
        SqliteKeyValueStore::new(&conn),
        FallbackConfig::new("guest-budget").unwrap(),
    );

    fallback.set("W7", 99.5);

    assert_eq!(
        fallback.store().get_raw("guest-budget-W7").unwrap().as_deref(),
        Some("99.5")
    );
    assert_eq!(fallback.store().get_raw("wallet-budget-W7").unwrap(), None);
}

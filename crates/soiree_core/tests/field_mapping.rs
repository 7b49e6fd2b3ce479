use serde_json::{json, Value};
use soiree_core::{BackendRecord, EntryCategory, LEDGER_ENTRY_FIELDS, WALLET_FIELDS};

fn record(value: Value) -> BackendRecord {
    value.as_object().cloned().expect("test record must be an object")
}

#[test]
fn wallet_budget_is_renamed_both_ways() {
    let backend = record(json!({ "id": "W1", "eventId": "E1", "budget": 5000 }));

    let client = WALLET_FIELDS.to_client(backend.clone());
    assert_eq!(client.get("totalBudget"), Some(&json!(5000)));
    assert!(client.get("budget").is_none());

    assert_eq!(WALLET_FIELDS.to_backend(client), backend);
}

#[test]
fn rename_is_a_bijection_over_varied_records() {
    let records = [
        record(json!({ "id": "W1", "budget": 1000.5, "name": "Main" })),
        record(json!({ "id": "W2", "budget": null })),
        record(json!({ "id": "W3" })),
        record(json!({ "budget": { "unexpected": "shape" }, "extra": [1, 2] })),
    ];

    for original in records {
        let round_tripped = WALLET_FIELDS.to_backend(WALLET_FIELDS.to_client(original.clone()));
        assert_eq!(round_tripped, original);
    }
}

#[test]
fn ledger_fields_rename_together_and_leave_others_untouched() {
    let backend = record(json!({
        "id": "T1",
        "walletId": "W1",
        "eventId": "E1",
        "category": "Catering",
        "amount": 2200,
        "type": 0,
        "date": "2026-07-04",
        "description": "plain notes"
    }));

    let client = LEDGER_ENTRY_FIELDS.to_client(backend.clone());
    assert_eq!(
        client,
        record(json!({
            "id": "T1",
            "walletId": "W1",
            "eventId": "E1",
            "category": "Catering",
            "amount": 2200,
            "direction": 0,
            "date": "2026-07-04",
            "notes": "plain notes"
        }))
    );
    assert_eq!(LEDGER_ENTRY_FIELDS.to_backend(client), backend);
}

#[test]
fn absent_source_yields_absent_target() {
    let client = WALLET_FIELDS.to_client(record(json!({ "id": "W1" })));
    assert!(!client.contains_key("totalBudget"));

    let backend = LEDGER_ENTRY_FIELDS.to_backend(record(json!({ "id": "T1" })));
    assert!(!backend.contains_key("type"));
    assert!(!backend.contains_key("description"));
}

#[test]
fn mapping_does_not_coerce_values() {
    let client = WALLET_FIELDS.to_client(record(json!({ "budget": "5000" })));
    assert_eq!(client.get("totalBudget"), Some(&json!("5000")));
}

#[test]
fn category_widening_keeps_unknown_values() {
    let known: EntryCategory = serde_json::from_value(json!("Decor")).unwrap();
    let unknown: EntryCategory = serde_json::from_value(json!("Photo Booth")).unwrap();

    assert_eq!(known, EntryCategory::Decor);
    assert_eq!(unknown.as_str(), "Photo Booth");
    assert!(!unknown.is_recognized());
}

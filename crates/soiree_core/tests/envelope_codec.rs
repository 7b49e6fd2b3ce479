use serde_json::{json, Value};
use soiree_core::{
    decode, encode, AttributeBag, EnvelopeFormat, ExtendedAttributes, PaymentStatus,
};

fn bag(value: Value) -> AttributeBag {
    value.as_object().cloned().expect("test bag must be an object")
}

fn assert_round_trip(attributes: AttributeBag, notes: &str) {
    let encoded = encode(&attributes, notes).unwrap();
    let decoded = decode(Some(&encoded));

    assert_eq!(decoded.format, EnvelopeFormat::Structured, "payload {encoded}");
    assert_eq!(decoded.attributes, attributes, "payload {encoded}");
    assert_eq!(decoded.notes, notes, "payload {encoded}");
}

#[test]
fn round_trip_preserves_varied_attribute_bags() {
    assert_round_trip(AttributeBag::new(), "");
    assert_round_trip(bag(json!({ "counterpartyName": "Acme Hall" })), "deposit");
    assert_round_trip(
        bag(json!({
            "nested": { "tables": [1, 2, { "vip": true }] },
            "ratio": 0.1,
            "tiny": 5e-324,
            "big": 18446744073709551615u64,
            "negative": -42,
            "explicitNull": null,
            "unicode": "Café – ünïcödé 🎉"
        })),
        "line one\nline \"two\"\t{\"_extended\":{}}",
    );
}

#[test]
fn round_trip_survives_repeated_save_load_cycles() {
    let original = bag(json!({ "status": "Partial", "dueDate": "2026-09-30", "amountDue": 1250.75 }));
    let mut attributes = original.clone();
    let mut notes = "balance due at rehearsal".to_string();

    for _ in 0..5 {
        let encoded = encode(&attributes, &notes).unwrap();
        let decoded = decode(Some(&encoded));
        attributes = decoded.attributes;
        notes = decoded.notes;
    }

    assert_eq!(attributes, original);
    assert_eq!(notes, "balance due at rehearsal");
}

#[test]
fn legacy_plain_text_is_notes() {
    let decoded = decode(Some("just some free text"));

    assert_eq!(decoded.format, EnvelopeFormat::LegacyPlain);
    assert!(decoded.attributes.is_empty());
    assert_eq!(decoded.notes, "just some free text");
}

#[test]
fn malformed_json_is_notes() {
    let decoded = decode(Some("{not valid json"));

    assert_eq!(decoded.format, EnvelopeFormat::LegacyPlain);
    assert!(decoded.attributes.is_empty());
    assert_eq!(decoded.notes, "{not valid json");
}

#[test]
fn json_without_marker_is_notes_verbatim() {
    for raw in [
        r#"{"notes":"looks structured"}"#,
        "[1,2,3]",
        "42",
        "\"quoted\"",
        "null",
        "",
    ] {
        let decoded = decode(Some(raw));
        assert_eq!(decoded.format, EnvelopeFormat::LegacyPlain, "raw {raw}");
        assert!(decoded.attributes.is_empty(), "raw {raw}");
        assert_eq!(decoded.notes, raw);
    }
}

#[test]
fn end_to_end_ledger_attributes_encode_exactly() {
    let attributes = ExtendedAttributes {
        counterparty_name: Some("Acme Hall".to_string()),
        status: Some(PaymentStatus::Pending),
        ..ExtendedAttributes::default()
    };

    let encoded = encode(&attributes, "deposit").unwrap();
    assert_eq!(
        encoded,
        r#"{"_extended":{"counterpartyName":"Acme Hall","status":"Pending"},"notes":"deposit"}"#
    );

    let decoded = decode(Some(&encoded));
    assert_eq!(ExtendedAttributes::from_bag(&decoded.attributes), attributes);
    assert_eq!(decoded.notes, "deposit");
}

#[test]
fn decode_is_independent_of_key_order() {
    let reordered = r#"{"notes":"deposit","_extended":{"status":"Pending","counterpartyName":"Acme Hall"}}"#;
    let decoded = decode(Some(reordered));

    assert_eq!(
        decoded.attributes,
        bag(json!({ "counterpartyName": "Acme Hall", "status": "Pending" }))
    );
    assert_eq!(decoded.notes, "deposit");
}

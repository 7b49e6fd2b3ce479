//! Notes-field envelope codec.
//!
//! # Responsibility
//! - Pack an attribute bag plus free-text notes into one string.
//! - Unpack any stored string back into `(attributes, notes)`.
//!
//! # Invariants
//! - `decode` is total: every input yields a value, never an error.
//! - The `_extended` marker key is the only discriminator between structured
//!   and legacy plain payloads.
//! - `decode(encode(a, n))` reproduces `(a, n)` for JSON-representable input.
//!
//! Wire shape:
//! `{"_extended":{"<attr>":<value>,...},"notes":"<free text>"}`

use serde::Serialize;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reserved key holding the attribute bag. Presence marks a structured payload.
pub const ENVELOPE_MARKER_KEY: &str = "_extended";
/// Key holding the free-text notes inside a structured payload.
pub const ENVELOPE_NOTES_KEY: &str = "notes";

/// Loosely-typed bag of extended attributes.
pub type AttributeBag = Map<String, Value>;

/// Which shape a decoded notes field had.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvelopeFormat {
    /// No value was stored.
    #[default]
    Absent,
    /// JSON object carrying the marker key.
    Structured,
    /// Anything else; the whole string is notes.
    LegacyPlain,
}

/// Result of unpacking a notes field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedEnvelope {
    pub attributes: AttributeBag,
    pub notes: String,
    pub format: EnvelopeFormat,
}

impl DecodedEnvelope {
    fn legacy(raw: &str) -> Self {
        Self {
            attributes: AttributeBag::new(),
            notes: raw.to_string(),
            format: EnvelopeFormat::LegacyPlain,
        }
    }
}

/// Failure to produce an envelope string.
#[derive(Debug)]
pub enum EncodeError {
    /// Attributes could not be serialized (e.g. a map with non-string keys).
    Serialize(serde_json::Error),
    /// Attributes serialized to something other than a JSON object.
    NotAnObject(&'static str),
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize extended attributes: {err}"),
            Self::NotAnObject(kind) => write!(
                f,
                "extended attributes must serialize to a JSON object, got {kind}"
            ),
        }
    }
}

impl Error for EncodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::NotAnObject(_) => None,
        }
    }
}

#[derive(Serialize)]
struct EnvelopeWire<'a> {
    #[serde(rename = "_extended")]
    extended: &'a AttributeBag,
    notes: &'a str,
}

/// Unpacks a stored notes field.
///
/// - `None` yields empty attributes and empty notes.
/// - A JSON object with [`ENVELOPE_MARKER_KEY`] yields its bag and notes; a
///   marker value that is not an object reads as an empty bag, a missing or
///   non-string notes value reads as `""`.
/// - Anything else (plain text, malformed JSON, JSON without the marker) is
///   returned whole as notes.
pub fn decode(raw: Option<&str>) -> DecodedEnvelope {
    let Some(raw) = raw else {
        return DecodedEnvelope::default();
    };

    let mut object = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(object)) if object.contains_key(ENVELOPE_MARKER_KEY) => object,
        _ => return DecodedEnvelope::legacy(raw),
    };

    let attributes = match object.remove(ENVELOPE_MARKER_KEY) {
        Some(Value::Object(bag)) => bag,
        _ => AttributeBag::new(),
    };
    let notes = match object.remove(ENVELOPE_NOTES_KEY) {
        Some(Value::String(notes)) => notes,
        _ => String::new(),
    };

    DecodedEnvelope {
        attributes,
        notes,
        format: EnvelopeFormat::Structured,
    }
}

/// Packs attributes and notes into a structured envelope string.
///
/// `attributes` may be an [`AttributeBag`] or any type serializing to a JSON
/// object; `None`-valued fields are expected to be skipped by its
/// `Serialize` impl. A unit/`null` serialization is written as an empty bag.
///
/// # Errors
/// - [`EncodeError::Serialize`] when serialization fails.
/// - [`EncodeError::NotAnObject`] when the attributes are not object-shaped.
pub fn encode<A: Serialize + ?Sized>(attributes: &A, notes: &str) -> Result<String, EncodeError> {
    let bag = match serde_json::to_value(attributes).map_err(EncodeError::Serialize)? {
        Value::Object(bag) => bag,
        Value::Null => AttributeBag::new(),
        other => return Err(EncodeError::NotAnObject(json_kind(&other))),
    };

    serde_json::to_string(&EnvelopeWire {
        extended: &bag,
        notes,
    })
    .map_err(EncodeError::Serialize)
}

/// Returns whether `raw` would decode as a structured envelope.
pub fn is_structured(raw: &str) -> bool {
    decode(Some(raw)).format == EnvelopeFormat::Structured
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::{decode, encode, is_structured, AttributeBag, EncodeError, EnvelopeFormat};
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn decode_none_is_empty() {
        let decoded = decode(None);
        assert!(decoded.attributes.is_empty());
        assert_eq!(decoded.notes, "");
        assert_eq!(decoded.format, EnvelopeFormat::Absent);
    }

    #[test]
    fn decode_marker_with_non_object_value_yields_empty_bag() {
        let decoded = decode(Some(r#"{"_extended":"oops","notes":"kept"}"#));
        assert_eq!(decoded.format, EnvelopeFormat::Structured);
        assert!(decoded.attributes.is_empty());
        assert_eq!(decoded.notes, "kept");
    }

    #[test]
    fn decode_structured_without_notes_defaults_to_empty() {
        let decoded = decode(Some(r#"{"_extended":{"status":"Paid"}}"#));
        assert_eq!(decoded.notes, "");
        assert_eq!(decoded.attributes.get("status"), Some(&json!("Paid")));
    }

    #[test]
    fn decode_non_string_notes_reads_as_empty() {
        let decoded = decode(Some(r#"{"_extended":{},"notes":17}"#));
        assert_eq!(decoded.format, EnvelopeFormat::Structured);
        assert_eq!(decoded.notes, "");
    }

    #[test]
    fn encode_writes_empty_bag_for_null_attributes() {
        let encoded = encode(&(), "plain").unwrap();
        assert_eq!(encoded, r#"{"_extended":{},"notes":"plain"}"#);
    }

    #[test]
    fn encode_rejects_non_object_attributes() {
        let err = encode(&vec![1, 2, 3], "n").unwrap_err();
        assert!(matches!(err, EncodeError::NotAnObject("array")));
    }

    #[test]
    fn encode_surfaces_serialization_failures() {
        let mut attributes: HashMap<(u8, u8), &str> = HashMap::new();
        attributes.insert((1, 2), "tuple keys are not JSON object keys");

        let err = encode(&attributes, "n").unwrap_err();
        assert!(matches!(err, EncodeError::Serialize(_)));
    }

    #[test]
    fn encode_keeps_explicit_nulls_in_a_raw_bag() {
        let mut bag = AttributeBag::new();
        bag.insert("dueDate".to_string(), serde_json::Value::Null);

        let encoded = encode(&bag, "").unwrap();
        assert_eq!(decode(Some(&encoded)).attributes, bag);
    }

    #[test]
    fn is_structured_discriminates_on_marker_only() {
        assert!(is_structured(r#"{"_extended":{}}"#));
        assert!(!is_structured(r#"{"notes":"no marker"}"#));
        assert!(!is_structured("plain"));
    }
}

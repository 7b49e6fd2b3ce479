//! Ledger entry domain model.
//!
//! # Responsibility
//! - Define the canonical ledger entry shared by budget views.
//! - Give the backend's loosely-typed category and numeric direction explicit
//!   Rust types.
//!
//! # Invariants
//! - `amount` is a magnitude; sign comes from `direction`.
//! - Unknown backend category strings survive unchanged in
//!   `EntryCategory::Unrecognized`.

use crate::codec::envelope::AttributeBag;
use crate::model::attributes::ExtendedAttributes;
use crate::model::{EntryId, EventId, WalletId};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

/// Budget category of a ledger entry.
///
/// The backend stores a free string; the client works with a closed set and
/// keeps anything else verbatim so it can be shown (and saved back) as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryCategory {
    Venue,
    Catering,
    Decor,
    Entertainment,
    Attire,
    Stationery,
    Gifts,
    Transport,
    Other,
    /// Backend value outside the known set.
    Unrecognized(String),
}

impl EntryCategory {
    /// Widens a backend category string into the client set.
    ///
    /// Matching is exact; any other value is passed through as
    /// `Unrecognized` rather than rejected.
    pub fn from_wire(value: &str) -> Self {
        match value {
            "Venue" => Self::Venue,
            "Catering" => Self::Catering,
            "Decor" => Self::Decor,
            "Entertainment" => Self::Entertainment,
            "Attire" => Self::Attire,
            "Stationery" => Self::Stationery,
            "Gifts" => Self::Gifts,
            "Transport" => Self::Transport,
            "Other" => Self::Other,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Stable wire string for this category.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Venue => "Venue",
            Self::Catering => "Catering",
            Self::Decor => "Decor",
            Self::Entertainment => "Entertainment",
            Self::Attire => "Attire",
            Self::Stationery => "Stationery",
            Self::Gifts => "Gifts",
            Self::Transport => "Transport",
            Self::Other => "Other",
            Self::Unrecognized(value) => value.as_str(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl Serialize for EntryCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntryCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&value))
    }
}

/// Money flow direction of a ledger entry.
///
/// The backend encodes this as a bare number; `0`/`1` are only its wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Money leaving the wallet.
    Expense,
    /// Money entering the wallet (gifts, refunds, contributions).
    Income,
}

impl Direction {
    pub fn to_wire(self) -> u8 {
        match self {
            Self::Expense => 0,
            Self::Income => 1,
        }
    }

    pub fn from_wire(value: u64) -> Option<Self> {
        match value {
            0 => Some(Self::Expense),
            1 => Some(Self::Income),
            _ => None,
        }
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.to_wire())
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u64::deserialize(deserializer)?;
        Self::from_wire(value).ok_or_else(|| {
            de::Error::custom(format!("invalid direction `{value}`; expected 0 or 1"))
        })
    }
}

/// Canonical ledger entry as seen by client code.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    /// `None` until the backend assigns an identity.
    pub id: Option<EntryId>,
    pub wallet_id: WalletId,
    pub event_id: EventId,
    pub category: EntryCategory,
    /// Non-negative magnitude.
    pub amount: f64,
    pub direction: Direction,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Attributes the backend has no column for.
    pub extended: ExtendedAttributes,
    /// Attribute bag as last decoded. Keys `extended` does not own are saved
    /// back unchanged.
    pub stored_attributes: AttributeBag,
    /// User-visible free text.
    pub notes: String,
}

impl LedgerEntry {
    /// Creates an unsaved entry with empty notes and no extended attributes.
    pub fn new(
        wallet_id: impl Into<WalletId>,
        event_id: impl Into<EventId>,
        category: EntryCategory,
        amount: f64,
        direction: Direction,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            wallet_id: wallet_id.into(),
            event_id: event_id.into(),
            category,
            amount,
            direction,
            date: date.into(),
            extended: ExtendedAttributes::default(),
            stored_attributes: AttributeBag::new(),
            notes: String::new(),
        }
    }

    /// Full attribute bag to persist: `stored_attributes` overlaid with the
    /// typed view.
    pub fn attribute_bag(&self) -> AttributeBag {
        self.extended.merge_into(&self.stored_attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, EntryCategory, LedgerEntry};
    use serde_json::json;

    #[test]
    fn category_passes_unknown_values_through() {
        let parsed: EntryCategory = serde_json::from_value(json!("Fireworks")).unwrap();
        assert_eq!(parsed, EntryCategory::Unrecognized("Fireworks".to_string()));
        assert!(!parsed.is_recognized());
        assert_eq!(serde_json::to_value(&parsed).unwrap(), json!("Fireworks"));
    }

    #[test]
    fn category_matching_is_case_sensitive() {
        assert_eq!(EntryCategory::from_wire("Venue"), EntryCategory::Venue);
        assert_eq!(
            EntryCategory::from_wire("venue"),
            EntryCategory::Unrecognized("venue".to_string())
        );
    }

    #[test]
    fn direction_uses_numeric_wire_encoding() {
        assert_eq!(serde_json::to_value(Direction::Expense).unwrap(), json!(0));
        assert_eq!(serde_json::to_value(Direction::Income).unwrap(), json!(1));
        assert_eq!(
            serde_json::from_value::<Direction>(json!(1)).unwrap(),
            Direction::Income
        );
        assert!(serde_json::from_value::<Direction>(json!(2)).is_err());
    }

    #[test]
    fn new_entry_has_an_empty_attribute_bag() {
        let mut entry = LedgerEntry::new(
            "w1",
            "e1",
            EntryCategory::Catering,
            120.5,
            Direction::Expense,
            "2026-06-01",
        );
        assert!(entry.attribute_bag().is_empty());

        entry.extended.due_date = Some("2026-06-20".to_string());
        assert_eq!(
            serde_json::Value::Object(entry.attribute_bag()),
            json!({ "dueDate": "2026-06-20" })
        );
    }
}

//! Extended attributes carried inside the notes envelope.
//!
//! # Responsibility
//! - Define the typed view over attributes the backend has no column for.
//! - Convert a loosely-typed attribute bag into that view without failing.
//!
//! # Invariants
//! - `None` fields are omitted on serialization, never written as `null`.
//! - A bag value of the wrong JSON type reads as absent.
//! - Merging the typed view back into a bag touches only keys the typed view
//!   owns; unknown keys and unparsed values pass through.

use crate::codec::envelope::AttributeBag;
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire key for [`ExtendedAttributes::counterparty_name`].
pub const COUNTERPARTY_NAME_KEY: &str = "counterpartyName";
/// Wire key for [`ExtendedAttributes::counterparty_contact`].
pub const COUNTERPARTY_CONTACT_KEY: &str = "counterpartyContact";
/// Wire key for [`ExtendedAttributes::status`].
pub const STATUS_KEY: &str = "status";
/// Wire key for [`ExtendedAttributes::due_date`].
pub const DUE_DATE_KEY: &str = "dueDate";

/// Settlement state of a ledger entry with a counterparty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Nothing paid yet.
    Pending,
    /// Deposit or instalment paid.
    Partial,
    /// Fully settled.
    Paid,
    /// Booking cancelled; no further payment expected.
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Partial => "Partial",
            Self::Paid => "Paid",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// Ledger entry attributes persisted only inside the envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedAttributes {
    /// Vendor or payee name, e.g. a venue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty_name: Option<String>,
    /// Free-form phone/email for the counterparty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    /// Calendar date (`YYYY-MM-DD`) the payment falls due.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl ExtendedAttributes {
    /// Builds the typed view from a decoded attribute bag.
    ///
    /// Keys this type does not know are ignored; known keys holding a value
    /// of the wrong shape are treated as absent.
    pub fn from_bag(bag: &AttributeBag) -> Self {
        Self {
            counterparty_name: bag_field(bag, COUNTERPARTY_NAME_KEY),
            counterparty_contact: bag_field(bag, COUNTERPARTY_CONTACT_KEY),
            status: bag_field(bag, STATUS_KEY),
            due_date: bag_field(bag, DUE_DATE_KEY),
        }
    }

    /// Flattens the typed view back into a bag, omitting unset fields.
    pub fn to_bag(&self) -> AttributeBag {
        let mut bag = AttributeBag::new();
        if let Some(name) = &self.counterparty_name {
            bag.insert(COUNTERPARTY_NAME_KEY.to_string(), Value::from(name.as_str()));
        }
        if let Some(contact) = &self.counterparty_contact {
            bag.insert(
                COUNTERPARTY_CONTACT_KEY.to_string(),
                Value::from(contact.as_str()),
            );
        }
        if let Some(status) = self.status {
            bag.insert(STATUS_KEY.to_string(), Value::from(status.as_str()));
        }
        if let Some(due_date) = &self.due_date {
            bag.insert(DUE_DATE_KEY.to_string(), Value::from(due_date.as_str()));
        }
        bag
    }

    /// Writes the typed view over `bag`.
    ///
    /// Keys whose stored value the typed view recognized are replaced by the
    /// current typed value or removed when it is now unset. Everything else in
    /// `bag` is kept as stored, including unknown keys and known keys whose
    /// value did not parse.
    pub fn merge_into(&self, bag: &AttributeBag) -> AttributeBag {
        let mut merged = bag.clone();
        for key in Self::from_bag(bag).to_bag().keys() {
            merged.remove(key);
        }
        merged.extend(self.to_bag());
        merged
    }

    /// Returns whether no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.counterparty_name.is_none()
            && self.counterparty_contact.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
    }
}

fn bag_field<T: DeserializeOwned>(bag: &AttributeBag, key: &str) -> Option<T> {
    let value = bag.get(key)?;
    if value.is_null() {
        return None;
    }

    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            debug!(
                "event=attribute_decode module=model status=skipped key={} error={}",
                key, err
            );
            None
        }
    }
}

//! Ledger entry read/write paths.
//!
//! Read: backend record → rename → unpack envelope → `LedgerEntry`.
//! Write: `LedgerEntry` → pack envelope → rename → backend record.

use crate::codec::envelope::{self, EncodeError};
use crate::mapping::field_mapper::{BackendRecord, LEDGER_ENTRY_FIELDS};
use crate::model::attributes::ExtendedAttributes;
use crate::model::ledger::{Direction, EntryCategory, LedgerEntry};
use crate::model::{EntryId, EventId, WalletId};
use crate::reconcile::policy::{CoreError, CoreResult};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Client-vocabulary row; `notes` still holds the raw envelope.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LedgerEntryRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<EntryId>,
    wallet_id: WalletId,
    event_id: EventId,
    category: EntryCategory,
    amount: f64,
    direction: Direction,
    date: String,
    #[serde(default)]
    notes: Option<String>,
}

/// Maps a raw backend ledger record into a client `LedgerEntry`.
///
/// The notes column is decoded leniently: legacy plain text becomes `notes`
/// with no extended attributes. The decoded bag is kept whole on the entry.
///
/// # Errors
/// - `CoreError::InvalidRecord` when a canonical field is missing or has the
///   wrong type (e.g. an unknown direction number).
pub fn entry_from_backend(record: BackendRecord) -> CoreResult<LedgerEntry> {
    let client = LEDGER_ENTRY_FIELDS.to_client(record);
    let row: LedgerEntryRow = serde_json::from_value(Value::Object(client))
        .map_err(|err| CoreError::InvalidRecord(format!("ledger entry: {err}")))?;

    let decoded = envelope::decode(row.notes.as_deref());
    debug!(
        "event=entry_decode module=reconcile status=ok format={:?} attribute_count={}",
        decoded.format,
        decoded.attributes.len()
    );
    let extended = ExtendedAttributes::from_bag(&decoded.attributes);

    Ok(LedgerEntry {
        id: row.id,
        wallet_id: row.wallet_id,
        event_id: row.event_id,
        category: row.category,
        amount: row.amount,
        direction: row.direction,
        date: row.date,
        extended,
        stored_attributes: decoded.attributes,
        notes: decoded.notes,
    })
}

/// Maps a client `LedgerEntry` into a backend request record.
///
/// The envelope carries `stored_attributes` with the typed view written over
/// the keys it owns, so attributes this build does not understand survive.
///
/// # Errors
/// - `CoreError::Encode` when the envelope cannot be produced.
pub fn entry_to_backend(entry: &LedgerEntry) -> CoreResult<BackendRecord> {
    let packed = envelope::encode(&entry.attribute_bag(), &entry.notes)?;
    let row = LedgerEntryRow {
        id: entry.id.clone(),
        wallet_id: entry.wallet_id.clone(),
        event_id: entry.event_id.clone(),
        category: entry.category.clone(),
        amount: entry.amount,
        direction: entry.direction,
        date: entry.date.clone(),
        notes: Some(packed),
    };

    match serde_json::to_value(&row) {
        Ok(Value::Object(client)) => Ok(LEDGER_ENTRY_FIELDS.to_backend(client)),
        Ok(_) => Err(CoreError::Encode(EncodeError::NotAnObject("ledger entry"))),
        Err(err) => Err(CoreError::Encode(EncodeError::Serialize(err))),
    }
}

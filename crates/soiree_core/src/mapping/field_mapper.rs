//! Static rename tables and the record mapper that applies them.
//!
//! # Responsibility
//! - Move values between backend and client key names in both directions.
//!
//! # Invariants
//! - An absent source key produces an absent target key.
//! - All pairs are applied as one simultaneous rename, so the result does not
//!   depend on pair order.
//! - Keys not named by any pair pass through untouched.
//!
//! Category strings are widened into `EntryCategory` when the client record is
//! deserialized, not here; this layer stays value-agnostic.

use serde_json::{Map, Value};

/// Raw record in backend vocabulary, as supplied by the transport.
pub type BackendRecord = Map<String, Value>;
/// Record in client vocabulary, still loosely typed.
pub type ClientRecord = Map<String, Value>;

/// One backend/client key association.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenamePair {
    pub backend: &'static str,
    pub client: &'static str,
}

/// Wallet rename table: `budget` ⇄ `totalBudget`.
pub const WALLET_FIELDS: FieldMapper = FieldMapper::new(&[RenamePair {
    backend: "budget",
    client: "totalBudget",
}]);

/// Ledger entry rename table.
///
/// `type` carries the numeric direction; `description` is the backend notes
/// column that holds the envelope.
pub const LEDGER_ENTRY_FIELDS: FieldMapper = FieldMapper::new(&[
    RenamePair {
        backend: "type",
        client: "direction",
    },
    RenamePair {
        backend: "description",
        client: "notes",
    },
]);

/// Bidirectional key renamer over a fixed set of pairs.
#[derive(Debug, Clone, Copy)]
pub struct FieldMapper {
    pairs: &'static [RenamePair],
}

impl FieldMapper {
    pub const fn new(pairs: &'static [RenamePair]) -> Self {
        Self { pairs }
    }

    pub fn pairs(&self) -> &'static [RenamePair] {
        self.pairs
    }

    /// Renames backend keys to client keys.
    pub fn to_client(&self, record: BackendRecord) -> ClientRecord {
        rename(record, self.pairs.iter().map(|pair| (pair.backend, pair.client)))
    }

    /// Renames client keys to backend keys.
    pub fn to_backend(&self, record: ClientRecord) -> BackendRecord {
        rename(record, self.pairs.iter().map(|pair| (pair.client, pair.backend)))
    }
}

fn rename<'a>(
    mut record: Map<String, Value>,
    pairs: impl Iterator<Item = (&'a str, &'a str)>,
) -> Map<String, Value> {
    // Detach every source first so a target name that is also a source name
    // elsewhere cannot be clobbered mid-pass.
    let moved: Vec<(&str, Value)> = pairs
        .filter_map(|(from, to)| record.remove(from).map(|value| (to, value)))
        .collect();

    for (to, value) in moved {
        record.insert(to.to_string(), value);
    }
    record
}

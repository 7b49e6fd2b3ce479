//! Persistence reconciliation core for Soiree.
//! This crate owns the translation between the client's budget model and the
//! narrower backend schema.

pub mod codec;
pub mod db;
pub mod logging;
pub mod mapping;
pub mod model;
pub mod reconcile;
pub mod service;
pub mod store;

pub use codec::envelope::{
    decode, encode, is_structured, AttributeBag, DecodedEnvelope, EncodeError, EnvelopeFormat,
    ENVELOPE_MARKER_KEY, ENVELOPE_NOTES_KEY,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use mapping::field_mapper::{
    BackendRecord, ClientRecord, FieldMapper, RenamePair, LEDGER_ENTRY_FIELDS, WALLET_FIELDS,
};
pub use model::attributes::{ExtendedAttributes, PaymentStatus};
pub use model::ledger::{Direction, EntryCategory, LedgerEntry};
pub use model::wallet::Wallet;
pub use model::{EntryId, EventId, WalletId};
pub use reconcile::ledger::{entry_from_backend, entry_to_backend};
pub use reconcile::policy::{BudgetSource, CoreError, CoreResult, ReconciliationPolicy};
pub use service::backend::{Backend, BackendError, BackendResult, InMemoryBackend};
pub use service::ledger_service::LedgerService;
pub use service::wallet_service::WalletService;
pub use service::{ServiceError, ServiceResult};
pub use store::fallback::{FallbackConfig, FallbackConfigError, FallbackStore};
pub use store::kv::{KeyValueStore, MemoryKeyValueStore, StoreError, StoreResult};
pub use store::sqlite::SqliteKeyValueStore;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

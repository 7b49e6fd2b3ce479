//! Backend transport contract and an in-memory simulation.
//!
//! # Responsibility
//! - Define the raw-record CRUD surface the services call.
//! - Provide `InMemoryBackend`, a stand-in whose schema can drop the wallet
//!   budget the way older backend deployments do.
//!
//! # Invariants
//! - Records cross this boundary in backend vocabulary only.
//! - The backend assigns identities on create.

use crate::mapping::field_mapper::BackendRecord;
use crate::reconcile::policy::ID_FIELD;
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Backend field holding the wallet budget.
const BUDGET_FIELD: &str = "budget";
/// Backend field linking an entry to its wallet.
const WALLET_ID_FIELD: &str = "walletId";
/// Backend field holding an entry date.
const DATE_FIELD: &str = "date";

pub type BackendResult<T> = Result<T, BackendError>;

/// Failure reported by the transport or the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    NotFound(String),
    /// Backend refused the request (validation, permissions).
    Rejected(String),
    /// Request could not be delivered or answered.
    Transport(String),
}

impl Display for BackendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "backend record not found: {id}"),
            Self::Rejected(message) => write!(f, "backend rejected request: {message}"),
            Self::Transport(message) => write!(f, "backend transport failure: {message}"),
        }
    }
}

impl Error for BackendError {}

/// Raw-record backend operations used by the services.
pub trait Backend {
    /// Creates a wallet and returns the stored record (with its new `id`).
    fn create_wallet(&self, record: &BackendRecord) -> BackendResult<BackendRecord>;
    fn update_wallet(&self, wallet_id: &str, record: &BackendRecord)
        -> BackendResult<BackendRecord>;
    fn get_wallet(&self, wallet_id: &str) -> BackendResult<Option<BackendRecord>>;
    fn delete_wallet(&self, wallet_id: &str) -> BackendResult<()>;
    fn create_entry(&self, record: &BackendRecord) -> BackendResult<BackendRecord>;
    fn update_entry(&self, entry_id: &str, record: &BackendRecord)
        -> BackendResult<BackendRecord>;
    fn get_entry(&self, entry_id: &str) -> BackendResult<Option<BackendRecord>>;
    fn list_entries(&self, wallet_id: &str) -> BackendResult<Vec<BackendRecord>>;
}

impl<B: Backend + ?Sized> Backend for &B {
    fn create_wallet(&self, record: &BackendRecord) -> BackendResult<BackendRecord> {
        (**self).create_wallet(record)
    }

    fn update_wallet(
        &self,
        wallet_id: &str,
        record: &BackendRecord,
    ) -> BackendResult<BackendRecord> {
        (**self).update_wallet(wallet_id, record)
    }

    fn get_wallet(&self, wallet_id: &str) -> BackendResult<Option<BackendRecord>> {
        (**self).get_wallet(wallet_id)
    }

    fn delete_wallet(&self, wallet_id: &str) -> BackendResult<()> {
        (**self).delete_wallet(wallet_id)
    }

    fn create_entry(&self, record: &BackendRecord) -> BackendResult<BackendRecord> {
        (**self).create_entry(record)
    }

    fn update_entry(&self, entry_id: &str, record: &BackendRecord) -> BackendResult<BackendRecord> {
        (**self).update_entry(entry_id, record)
    }

    fn get_entry(&self, entry_id: &str) -> BackendResult<Option<BackendRecord>> {
        (**self).get_entry(entry_id)
    }

    fn list_entries(&self, wallet_id: &str) -> BackendResult<Vec<BackendRecord>> {
        (**self).list_entries(wallet_id)
    }
}

#[derive(Default)]
struct Tables {
    wallets: BTreeMap<String, BackendRecord>,
    entries: BTreeMap<String, BackendRecord>,
}

/// Process-local backend simulation.
pub struct InMemoryBackend {
    tables: Mutex<Tables>,
    persists_budget: bool,
}

impl InMemoryBackend {
    /// Backend whose wallet schema stores `budget`.
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            persists_budget: true,
        }
    }

    /// Backend whose wallet schema silently drops `budget`.
    pub fn without_budget_column() -> Self {
        Self {
            persists_budget: false,
            ..Self::new()
        }
    }

    fn tables(&self) -> BackendResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| BackendError::Transport("in-memory backend lock poisoned".to_string()))
    }

    fn stored_wallet(&self, wallet_id: &str, record: &BackendRecord) -> BackendRecord {
        let mut stored = record.clone();
        stored.insert(ID_FIELD.to_string(), Value::String(wallet_id.to_string()));
        if !self.persists_budget {
            stored.remove(BUDGET_FIELD);
        }
        stored
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for InMemoryBackend {
    fn create_wallet(&self, record: &BackendRecord) -> BackendResult<BackendRecord> {
        let wallet_id = Uuid::new_v4().to_string();
        let stored = self.stored_wallet(&wallet_id, record);
        self.tables()?.wallets.insert(wallet_id, stored.clone());
        Ok(stored)
    }

    fn update_wallet(
        &self,
        wallet_id: &str,
        record: &BackendRecord,
    ) -> BackendResult<BackendRecord> {
        let stored = self.stored_wallet(wallet_id, record);
        let mut tables = self.tables()?;
        let slot = tables
            .wallets
            .get_mut(wallet_id)
            .ok_or_else(|| BackendError::NotFound(wallet_id.to_string()))?;
        *slot = stored.clone();
        Ok(stored)
    }

    fn get_wallet(&self, wallet_id: &str) -> BackendResult<Option<BackendRecord>> {
        Ok(self.tables()?.wallets.get(wallet_id).cloned())
    }

    fn delete_wallet(&self, wallet_id: &str) -> BackendResult<()> {
        let mut tables = self.tables()?;
        if tables.wallets.remove(wallet_id).is_none() {
            return Err(BackendError::NotFound(wallet_id.to_string()));
        }
        tables.entries.retain(|_, entry| {
            entry.get(WALLET_ID_FIELD).and_then(Value::as_str) != Some(wallet_id)
        });
        Ok(())
    }

    fn create_entry(&self, record: &BackendRecord) -> BackendResult<BackendRecord> {
        let mut tables = self.tables()?;
        let wallet_id = record.get(WALLET_ID_FIELD).and_then(Value::as_str);
        match wallet_id {
            Some(wallet_id) if tables.wallets.contains_key(wallet_id) => {}
            Some(wallet_id) => return Err(BackendError::NotFound(wallet_id.to_string())),
            None => return Err(BackendError::Rejected("entry has no walletId".to_string())),
        }

        let entry_id = Uuid::new_v4().to_string();
        let mut stored = record.clone();
        stored.insert(ID_FIELD.to_string(), Value::String(entry_id.clone()));
        tables.entries.insert(entry_id, stored.clone());
        Ok(stored)
    }

    fn update_entry(&self, entry_id: &str, record: &BackendRecord) -> BackendResult<BackendRecord> {
        let mut stored = record.clone();
        stored.insert(ID_FIELD.to_string(), Value::String(entry_id.to_string()));

        let mut tables = self.tables()?;
        let slot = tables
            .entries
            .get_mut(entry_id)
            .ok_or_else(|| BackendError::NotFound(entry_id.to_string()))?;
        *slot = stored.clone();
        Ok(stored)
    }

    fn get_entry(&self, entry_id: &str) -> BackendResult<Option<BackendRecord>> {
        Ok(self.tables()?.entries.get(entry_id).cloned())
    }

    fn list_entries(&self, wallet_id: &str) -> BackendResult<Vec<BackendRecord>> {
        let tables = self.tables()?;
        let mut entries: Vec<BackendRecord> = tables
            .entries
            .values()
            .filter(|entry| entry.get(WALLET_ID_FIELD).and_then(Value::as_str) == Some(wallet_id))
            .cloned()
            .collect();
        entries.sort_by(|a, b| {
            let date_a = a.get(DATE_FIELD).and_then(Value::as_str);
            let date_b = b.get(DATE_FIELD).and_then(Value::as_str);
            date_a.cmp(&date_b)
        });
        Ok(entries)
    }
}

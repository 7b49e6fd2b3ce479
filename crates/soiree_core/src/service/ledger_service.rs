//! Ledger entry use-case service.

use crate::model::ledger::LedgerEntry;
use crate::reconcile::ledger::{entry_from_backend, entry_to_backend};
use crate::service::backend::Backend;
use crate::service::{ServiceError, ServiceResult};
use log::{info, warn};

/// Ledger service facade over a backend.
pub struct LedgerService<B: Backend> {
    backend: B,
}

impl<B: Backend> LedgerService<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Creates an entry; extended attributes travel inside the notes envelope.
    ///
    /// Nothing is sent when the envelope cannot be encoded.
    pub fn create_entry(&self, entry: &LedgerEntry) -> ServiceResult<LedgerEntry> {
        let request = entry_to_backend(entry)?;
        let acknowledged = self.backend.create_entry(&request)?;
        let created = entry_from_backend(acknowledged)?;
        info!(
            "event=entry_create module=service status=ok wallet_id={}",
            created.wallet_id
        );
        Ok(created)
    }

    /// Replaces an entry by id.
    pub fn update_entry(&self, entry: &LedgerEntry) -> ServiceResult<LedgerEntry> {
        let entry_id = entry
            .id
            .as_deref()
            .ok_or(ServiceError::MissingId("ledger entry"))?;
        let request = entry_to_backend(entry)?;
        let acknowledged = self.backend.update_entry(entry_id, &request)?;
        Ok(entry_from_backend(acknowledged)?)
    }

    pub fn get_entry(&self, entry_id: &str) -> ServiceResult<Option<LedgerEntry>> {
        match self.backend.get_entry(entry_id)? {
            Some(record) => Ok(Some(entry_from_backend(record)?)),
            None => Ok(None),
        }
    }

    /// Lists a wallet's entries in backend order.
    ///
    /// Records violating the transport contract are skipped and logged so one
    /// bad row does not hide the rest of the ledger.
    pub fn list_entries(&self, wallet_id: &str) -> ServiceResult<Vec<LedgerEntry>> {
        let records = self.backend.list_entries(wallet_id)?;
        let total = records.len();
        let entries: Vec<LedgerEntry> = records
            .into_iter()
            .filter_map(|record| match entry_from_backend(record) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(
                        "event=entry_list module=service status=skipped wallet_id={} error={}",
                        wallet_id, err
                    );
                    None
                }
            })
            .collect();

        if entries.len() != total {
            warn!(
                "event=entry_list module=service status=partial wallet_id={} kept={} total={}",
                wallet_id,
                entries.len(),
                total
            );
        }
        Ok(entries)
    }
}

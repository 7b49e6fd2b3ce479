//! Wallet use-case service.
//!
//! # Responsibility
//! - Provide create/update/get/delete entry points for wallets.
//! - Keep the budget fallback cache consistent with backend writes.
//!
//! # Invariants
//! - The cache is written only after the backend acknowledged the write.
//! - A wallet deleted on the backend also loses its cached budget.

use crate::model::wallet::Wallet;
use crate::reconcile::policy::ReconciliationPolicy;
use crate::service::backend::Backend;
use crate::service::{ServiceError, ServiceResult};
use crate::store::kv::KeyValueStore;
use log::{error, info};

/// Wallet service facade over a backend and the reconciliation policy.
pub struct WalletService<B: Backend, S: KeyValueStore> {
    backend: B,
    policy: ReconciliationPolicy<S>,
}

impl<B: Backend, S: KeyValueStore> WalletService<B, S> {
    pub fn new(backend: B, policy: ReconciliationPolicy<S>) -> Self {
        Self { backend, policy }
    }

    pub fn policy(&self) -> &ReconciliationPolicy<S> {
        &self.policy
    }

    /// Creates a wallet and returns it as read back from the backend reply.
    pub fn create_wallet(&self, wallet: &Wallet) -> ServiceResult<Wallet> {
        let request = self.policy.wallet_to_backend(wallet)?;
        let acknowledged = self.backend.create_wallet(&request).map_err(|err| {
            error!("event=wallet_create module=service status=error error={err}");
            err
        })?;

        self.policy.record_wallet_write(wallet, &acknowledged);
        let created = self.policy.wallet_from_backend(acknowledged)?;
        info!(
            "event=wallet_create module=service status=ok wallet_id={}",
            created.id.as_deref().unwrap_or_default()
        );
        Ok(created)
    }

    /// Replaces a wallet by id.
    ///
    /// # Errors
    /// - `ServiceError::MissingId` when `wallet.id` is `None`.
    pub fn update_wallet(&self, wallet: &Wallet) -> ServiceResult<Wallet> {
        let wallet_id = wallet.id.as_deref().ok_or(ServiceError::MissingId("wallet"))?;
        let request = self.policy.wallet_to_backend(wallet)?;
        let acknowledged = self.backend.update_wallet(wallet_id, &request)?;

        self.policy.record_wallet_write(wallet, &acknowledged);
        let updated = self.policy.wallet_from_backend(acknowledged)?;
        info!("event=wallet_update module=service status=ok wallet_id={wallet_id}");
        Ok(updated)
    }

    /// Reads one wallet, reconciling its budget against the cache.
    pub fn get_wallet(&self, wallet_id: &str) -> ServiceResult<Option<Wallet>> {
        match self.backend.get_wallet(wallet_id)? {
            Some(record) => Ok(Some(self.policy.wallet_from_backend(record)?)),
            None => Ok(None),
        }
    }

    /// Deletes a wallet on the backend, then drops its cached budget.
    pub fn delete_wallet(&self, wallet_id: &str) -> ServiceResult<()> {
        self.backend.delete_wallet(wallet_id)?;
        self.policy.forget_wallet(wallet_id);
        info!("event=wallet_delete module=service status=ok wallet_id={wallet_id}");
        Ok(())
    }
}

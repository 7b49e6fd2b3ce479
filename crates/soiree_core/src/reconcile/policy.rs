//! Backend/fallback precedence rules for wallets.
//!
//! # Responsibility
//! - Turn raw backend wallet records into client `Wallet`s, filling the budget
//!   from the fallback cache when the backend omits it.
//! - Turn client `Wallet`s into backend request records.
//! - Keep the fallback cache in step with successful writes and deletions.
//!
//! # Invariants
//! - A present, non-null backend budget always wins over the cache.
//! - Every successful write carrying a budget also writes the cache, keyed by
//!   the identity the backend acknowledged.
//! - Cache failures never fail a read or write.

use crate::codec::envelope::EncodeError;
use crate::mapping::field_mapper::{BackendRecord, WALLET_FIELDS};
use crate::model::wallet::{Wallet, TOTAL_BUDGET_FIELD};
use crate::store::fallback::FallbackStore;
use crate::store::kv::KeyValueStore;
use log::{debug, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Backend-vocabulary identity key shared by all records.
pub const ID_FIELD: &str = "id";

pub type CoreResult<T> = Result<T, CoreError>;

/// Failure of a reconciliation-layer transformation.
#[derive(Debug)]
pub enum CoreError {
    /// Extended attributes could not be packed; the write must not proceed.
    Encode(EncodeError),
    /// A backend record violates the transport contract (missing identity,
    /// wrong-typed canonical field).
    InvalidRecord(String),
}

impl Display for CoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "{err}"),
            Self::InvalidRecord(message) => write!(f, "invalid backend record: {message}"),
        }
    }
}

impl Error for CoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::InvalidRecord(_) => None,
        }
    }
}

impl From<EncodeError> for CoreError {
    fn from(value: EncodeError) -> Self {
        Self::Encode(value)
    }
}

/// Where a resolved scalar came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetSource {
    Backend,
    Fallback,
    Unset,
}

/// Composes field mapping and the fallback cache for wallet records.
pub struct ReconciliationPolicy<S: KeyValueStore> {
    fallback: FallbackStore<S>,
}

impl<S: KeyValueStore> ReconciliationPolicy<S> {
    pub fn new(fallback: FallbackStore<S>) -> Self {
        Self { fallback }
    }

    pub fn fallback(&self) -> &FallbackStore<S> {
        &self.fallback
    }

    /// Resolves the budget for `wallet_id` from the backend value, if any.
    ///
    /// A number is authoritative. Absence or `null` consults the cache. Any
    /// other JSON type is not coerced; it is logged and treated as absent.
    pub fn resolve_budget(
        &self,
        wallet_id: &str,
        backend_value: Option<&Value>,
    ) -> (Option<f64>, BudgetSource) {
        match backend_value {
            Some(Value::Number(number)) => {
                if let Some(value) = number.as_f64() {
                    return (Some(value), BudgetSource::Backend);
                }
            }
            None | Some(Value::Null) => {}
            Some(other) => warn!(
                "event=budget_resolve module=reconcile status=ignored wallet_id={} reason=non_numeric_backend_value kind={}",
                wallet_id,
                if other.is_string() { "string" } else { "other" }
            ),
        }

        match self.fallback.get(wallet_id) {
            Some(value) => {
                debug!(
                    "event=budget_resolve module=reconcile status=fallback wallet_id={}",
                    wallet_id
                );
                (Some(value), BudgetSource::Fallback)
            }
            None => (None, BudgetSource::Unset),
        }
    }

    /// Maps a raw backend wallet record into a client `Wallet`.
    ///
    /// # Errors
    /// - `CoreError::InvalidRecord` when the record has no string `id` or a
    ///   canonical field has the wrong type.
    pub fn wallet_from_backend(&self, record: BackendRecord) -> CoreResult<Wallet> {
        let mut client = WALLET_FIELDS.to_client(record);
        let backend_budget = client.remove(TOTAL_BUDGET_FIELD);

        let mut wallet: Wallet = serde_json::from_value(Value::Object(client))
            .map_err(|err| CoreError::InvalidRecord(format!("wallet: {err}")))?;
        let wallet_id = wallet
            .id
            .clone()
            .ok_or_else(|| CoreError::InvalidRecord("wallet record has no id".to_string()))?;

        let (total_budget, _) = self.resolve_budget(&wallet_id, backend_budget.as_ref());
        wallet.total_budget = total_budget;
        Ok(wallet)
    }

    /// Maps a client `Wallet` into a backend request record.
    pub fn wallet_to_backend(&self, wallet: &Wallet) -> CoreResult<BackendRecord> {
        match serde_json::to_value(wallet) {
            Ok(Value::Object(client)) => Ok(WALLET_FIELDS.to_backend(client)),
            Ok(_) => Err(CoreError::Encode(EncodeError::NotAnObject("wallet"))),
            Err(err) => Err(CoreError::Encode(EncodeError::Serialize(err))),
        }
    }

    /// Records a successful wallet create/update in the fallback cache.
    ///
    /// The cache key is the identity in `acknowledged`, falling back to the
    /// requested wallet's id. The acknowledged budget is not consulted: the
    /// caller's value is cached whatever the response shape.
    pub fn record_wallet_write(&self, requested: &Wallet, acknowledged: &BackendRecord) {
        let Some(total_budget) = requested.total_budget else {
            return;
        };

        let wallet_id = acknowledged
            .get(ID_FIELD)
            .and_then(Value::as_str)
            .or(requested.id.as_deref());
        match wallet_id {
            Some(wallet_id) => self.fallback.set(wallet_id, total_budget),
            None => warn!(
                "event=budget_backup module=reconcile status=skipped reason=no_wallet_id"
            ),
        }
    }

    /// Drops the cached budget of a deleted wallet.
    pub fn forget_wallet(&self, wallet_id: &str) {
        self.fallback.delete(wallet_id);
    }
}

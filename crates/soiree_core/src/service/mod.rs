//! Data-access use-case services.
//!
//! # Responsibility
//! - Orchestrate backend transport calls and the reconciliation layer.
//! - Hand client-shaped entities to callers; never expose envelopes or
//!   backend field names.
//!
//! # Invariants
//! - A backend failure always propagates; cache upkeep never does.
//! - Fallback writes happen only after the backend acknowledged the write.

pub mod backend;
pub mod ledger_service;
pub mod wallet_service;

use crate::reconcile::policy::CoreError;
use crate::service::backend::BackendError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for wallet and ledger use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Reconciliation-layer failure (encode error, malformed record).
    Core(CoreError),
    /// Transport or backend failure.
    Backend(BackendError),
    /// An update was requested for an entity without identity.
    MissingId(&'static str),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Core(err) => write!(f, "{err}"),
            Self::Backend(err) => write!(f, "{err}"),
            Self::MissingId(entity) => write!(f, "{entity} has no id; create it first"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Core(err) => Some(err),
            Self::Backend(err) => Some(err),
            Self::MissingId(_) => None,
        }
    }
}

impl From<CoreError> for ServiceError {
    fn from(value: CoreError) -> Self {
        Self::Core(value)
    }
}

impl From<BackendError> for ServiceError {
    fn from(value: BackendError) -> Self {
        Self::Backend(value)
    }
}

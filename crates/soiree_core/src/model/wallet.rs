//! Wallet (owning collection) model.

use crate::model::{EventId, WalletId};
use serde::{Deserialize, Serialize};

/// Client-vocabulary key of the wallet budget.
pub const TOTAL_BUDGET_FIELD: &str = "totalBudget";

/// A budget wallet belonging to one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    /// `None` until the backend assigns an identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<WalletId>,
    pub event_id: EventId,
    #[serde(default)]
    pub name: String,
    /// Planned spend ceiling. Reconciled from backend and fallback on read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_budget: Option<f64>,
}

impl Wallet {
    /// Creates an unsaved wallet.
    pub fn new(event_id: impl Into<EventId>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            event_id: event_id.into(),
            name: name.into(),
            total_budget: None,
        }
    }

    pub fn with_budget(mut self, total_budget: f64) -> Self {
        self.total_budget = Some(total_budget);
        self
    }
}

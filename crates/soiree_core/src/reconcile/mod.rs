//! Reconciliation between backend records and client entities.
//!
//! # Responsibility
//! - Compose field mapping, the envelope codec and the fallback cache into
//!   the read and write paths used by services.
//!
//! # Invariants
//! - Only `CoreError::Encode` originates here; malformed envelopes and cache
//!   failures degrade to "absent" or "plain text".
//! - `CoreError::InvalidRecord` only forwards transport contract violations.

pub mod ledger;
pub mod policy;

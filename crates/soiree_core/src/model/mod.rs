//! Client-side domain model for budget tracking.
//!
//! # Responsibility
//! - Define the client-shaped entities consumed by UI and service callers.
//! - Give backend wire values (category strings, direction numbers) explicit
//!   Rust types.
//!
//! # Invariants
//! - Client entities never carry the raw envelope or backend field names.
//! - Identities are opaque strings assigned by the backend.

pub mod attributes;
pub mod ledger;
pub mod wallet;

/// Opaque identity of an owning collection (a wallet).
pub type WalletId = String;
/// Opaque identity of an owning scope (an event).
pub type EventId = String;
/// Opaque identity of a ledger entry.
pub type EntryId = String;

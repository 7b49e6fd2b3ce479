//! Backend/client field vocabulary mapping.
//!
//! # Responsibility
//! - Rename semantically identical fields between backend and client records.
//!
//! # Invariants
//! - Every mapper is a bijection over its renamed fields.
//! - Mapping never invents defaults and never coerces types.

pub mod field_mapper;

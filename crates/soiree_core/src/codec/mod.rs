//! Wire codecs for backend text fields.
//!
//! # Responsibility
//! - Multiplex extended attributes and free-text notes into the backend's
//!   single notes column.
//!
//! # See also
//! - `codec::envelope` for the wire format.

pub mod envelope;

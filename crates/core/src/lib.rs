//! Domain types, validation helpers, and the shared error taxonomy for the
//! journey backend.

pub mod error;
pub mod timeline;
pub mod types;

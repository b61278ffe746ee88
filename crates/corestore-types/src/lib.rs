//! Foundation types for CoreStore.
//!
//! These are the plain values that flow through the error layer and the
//! storage-handle collaborator. None of them are interpreted here beyond
//! identity and formatting.
//!
//! # Key Types
//!
//! - [`StoreLocation`] — URI of a persistent store file
//! - [`StoreReference`] — opaque external form of a configured storage
//! - [`SchemaHandle`] — identifier for a persistence schema (model)
//! - [`SchemaFingerprint`] — BLAKE3 digest identifying a schema's shape

pub mod error;
pub mod location;
pub mod reference;
pub mod schema;

pub use error::TypeError;
pub use location::StoreLocation;
pub use reference::StoreReference;
pub use schema::{SchemaFingerprint, SchemaHandle};

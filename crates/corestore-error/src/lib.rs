//! Typed CoreStore errors and the bridge to their legacy untyped form.
//!
//! Every failure raised by the storage lifecycle is a [`CoreStoreError`].
//! Older callers speak a looser dialect: a domain string, an integer code and
//! a map of payload values ([`UntypedError`]). The [`bridge`] converts between
//! the two without losing information:
//!
//! - [`lower`] turns a typed error into its untyped form. It never fails.
//! - [`lift`] turns any error back into a typed one. Foreign errors become
//!   [`CoreStoreError::Wrapped`]; malformed ones become
//!   [`CoreStoreError::Unknown`]. It never fails either.
//!
//! For every well-formed `e`, `lift(lower(e)) == e`.
//!
//! # Modules
//!
//! - [`code`] — the stable [`Code`] table and [`ERROR_DOMAIN`]
//! - [`error`] — [`CoreStoreError`], the typed taxonomy
//! - [`untyped`] — [`UntypedError`], [`PayloadValue`] and payload keys
//! - [`opaque`] — [`OpaqueError`], a shared handle to a foreign error
//! - [`bridge`] — [`lower`] and [`lift`]
//! - [`legacy`] — deprecated code aliases kept for old callers
//! - [`report`] — structured logging of raised errors

pub mod bridge;
pub mod code;
pub mod error;
pub mod legacy;
pub mod opaque;
pub mod report;
pub mod untyped;

pub use bridge::{lift, lift_untyped, lift_untyped_with, lift_with, lower};
pub use code::{Code, ERROR_DOMAIN};
pub use error::CoreStoreError;
pub use opaque::{OpaqueError, RecordedError};
pub use report::log_error;
pub use untyped::{keys, Payload, PayloadValue, UntypedError};

// Re-export the collaborator types that appear in error payloads.
pub use corestore_storage::{BuiltinResolver, StorageHandle, StorageResolver};
pub use corestore_types::{SchemaHandle, StoreLocation, StoreReference};

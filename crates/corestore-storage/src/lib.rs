//! Storage descriptors for CoreStore.
//!
//! A storage descriptor is the typed side of a persistent store: it knows its
//! store type, model configuration and options, and can produce the opaque
//! [`StoreReference`](corestore_types::StoreReference) the surrounding
//! framework passes around. The reverse direction, recovering a typed
//! descriptor from a reference, goes through a [`StorageResolver`].
//!
//! # Modules
//!
//! - [`error`] — Error types for descriptor and configuration handling
//! - [`traits`] — [`StorageInterface`] and [`StorageResolver`]
//! - [`options`] — [`LocalStorageOptions`] flags for file-backed stores
//! - [`sqlite`] — [`SqliteStorage`], the file-backed descriptor
//! - [`memory`] — [`InMemoryStorage`], the transient descriptor
//! - [`handle`] — [`StorageHandle`] and the [`BuiltinResolver`]
//! - [`config`] — [`StorageConfig`] loaded from TOML

pub mod config;
pub mod error;
pub mod handle;
pub mod memory;
pub mod options;
pub mod sqlite;
pub mod traits;

pub use config::{StorageConfig, StorageKind};
pub use error::{StorageError, StorageResult};
pub use handle::{BuiltinResolver, StorageHandle};
pub use memory::InMemoryStorage;
pub use options::LocalStorageOptions;
pub use sqlite::SqliteStorage;
pub use traits::{StorageInterface, StorageResolver};

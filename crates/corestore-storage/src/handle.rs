use std::collections::BTreeMap;
use std::fmt;

use corestore_types::{StoreLocation, StoreReference};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::memory::InMemoryStorage;
use crate::sqlite::SqliteStorage;
use crate::traits::{StorageInterface, StorageResolver};

/// Typed handle for any storage kind the framework knows about.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageHandle {
    Sqlite(SqliteStorage),
    InMemory(InMemoryStorage),
}

impl StorageHandle {
    fn inner(&self) -> &dyn StorageInterface {
        match self {
            StorageHandle::Sqlite(s) => s,
            StorageHandle::InMemory(s) => s,
        }
    }

    /// Returns `true` for file-backed storages.
    pub fn is_local(&self) -> bool {
        matches!(self, StorageHandle::Sqlite(_))
    }
}

impl StorageInterface for StorageHandle {
    fn store_type(&self) -> &'static str {
        self.inner().store_type()
    }

    fn configuration(&self) -> Option<&str> {
        self.inner().configuration()
    }

    fn location(&self) -> Option<&StoreLocation> {
        self.inner().location()
    }

    fn store_options(&self) -> BTreeMap<String, String> {
        self.inner().store_options()
    }
}

impl fmt::Display for StorageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageHandle::Sqlite(s) => fmt::Display::fmt(s, f),
            StorageHandle::InMemory(s) => fmt::Display::fmt(s, f),
        }
    }
}

impl From<SqliteStorage> for StorageHandle {
    fn from(storage: SqliteStorage) -> Self {
        StorageHandle::Sqlite(storage)
    }
}

impl From<InMemoryStorage> for StorageHandle {
    fn from(storage: InMemoryStorage) -> Self {
        StorageHandle::InMemory(storage)
    }
}

/// Resolver for the storage kinds shipped with this crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinResolver;

impl StorageResolver for BuiltinResolver {
    fn resolve(&self, reference: &StoreReference) -> Option<StorageHandle> {
        let handle = match reference.store_type.as_str() {
            SqliteStorage::STORE_TYPE => SqliteStorage::from_reference(reference).map(Into::into),
            InMemoryStorage::STORE_TYPE => {
                InMemoryStorage::from_reference(reference).map(Into::into)
            }
            _ => None,
        };
        if handle.is_none() {
            trace!(store_type = %reference.store_type, "store reference did not resolve");
        }
        handle
    }
}

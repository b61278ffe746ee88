use std::collections::BTreeMap;

use corestore_types::{StoreLocation, StoreReference};

use crate::handle::StorageHandle;

/// Typed description of a persistent store.
///
/// Implementations must produce an external form that their resolver maps
/// back to an equal descriptor.
pub trait StorageInterface: Send + Sync {
    /// Store type identifier (e.g. "SQLite").
    fn store_type(&self) -> &'static str;

    /// Model configuration the store is added with.
    fn configuration(&self) -> Option<&str>;

    /// Location the store lives at, if it has one.
    fn location(&self) -> Option<&StoreLocation> {
        None
    }

    /// Store options as string pairs.
    fn store_options(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    /// Opaque reference describing this store to the framework.
    fn external_form(&self) -> StoreReference {
        StoreReference {
            store_type: self.store_type().to_owned(),
            location: self.location().cloned(),
            configuration: self.configuration().map(str::to_owned),
            options: self.store_options(),
        }
    }
}

/// Reverse lookup from an opaque store reference to a typed storage handle.
///
/// Resolution must be read-only and safe to call from several threads at
/// once. `None` means the reference is not a recognized storage kind.
pub trait StorageResolver: Send + Sync {
    fn resolve(&self, reference: &StoreReference) -> Option<StorageHandle>;
}

impl<F> StorageResolver for F
where
    F: Fn(&StoreReference) -> Option<StorageHandle> + Send + Sync,
{
    fn resolve(&self, reference: &StoreReference) -> Option<StorageHandle> {
        self(reference)
    }
}

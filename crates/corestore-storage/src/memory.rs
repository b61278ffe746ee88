use std::fmt;

use corestore_types::StoreReference;
use serde::{Deserialize, Serialize};

use crate::traits::StorageInterface;

/// Transient in-memory store descriptor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InMemoryStorage {
    configuration: Option<String>,
}

impl InMemoryStorage {
    /// Store type identifier used in store references.
    pub const STORE_TYPE: &'static str = "InMemory";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = Some(configuration.into());
        self
    }

    /// Recover a descriptor from its external form.
    pub fn from_reference(reference: &StoreReference) -> Option<Self> {
        (reference.store_type == Self::STORE_TYPE).then(|| Self {
            configuration: reference.configuration.clone(),
        })
    }
}

impl StorageInterface for InMemoryStorage {
    fn store_type(&self) -> &'static str {
        Self::STORE_TYPE
    }

    fn configuration(&self) -> Option<&str> {
        self.configuration.as_deref()
    }
}

impl fmt::Display for InMemoryStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("in-memory store")?;
        if let Some(configuration) = &self.configuration {
            write!(f, " [{configuration}]")?;
        }
        Ok(())
    }
}

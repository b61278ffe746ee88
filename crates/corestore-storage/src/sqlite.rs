use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use corestore_types::{StoreLocation, StoreReference};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::options::{LocalStorageOptions, LOCAL_STORAGE_OPTIONS_KEY};
use crate::traits::StorageInterface;

/// File-backed SQLite store descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SqliteStorage {
    location: StoreLocation,
    configuration: Option<String>,
    local_storage_options: LocalStorageOptions,
}

impl SqliteStorage {
    /// Store type identifier used in store references.
    pub const STORE_TYPE: &'static str = "SQLite";

    /// Default file name when none is configured.
    pub const DEFAULT_FILE_NAME: &'static str = "corestore.sqlite";

    /// Descriptor for a store at `location` with default settings.
    pub fn new(location: impl Into<StoreLocation>) -> Self {
        Self {
            location: location.into(),
            configuration: None,
            local_storage_options: LocalStorageOptions::none(),
        }
    }

    /// Descriptor for `file_name` inside `directory`.
    pub fn in_directory(directory: impl AsRef<Path>, file_name: &str) -> Self {
        Self::new(StoreLocation::from_path(directory.as_ref().join(file_name)))
    }

    pub fn with_configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = Some(configuration.into());
        self
    }

    pub fn with_local_storage_options(mut self, options: LocalStorageOptions) -> Self {
        self.local_storage_options = options;
        self
    }

    pub fn file_location(&self) -> &StoreLocation {
        &self.location
    }

    pub fn local_storage_options(&self) -> LocalStorageOptions {
        self.local_storage_options
    }

    /// Recover a descriptor from its external form.
    ///
    /// Returns `None` for other store types, references without a location,
    /// and malformed option bits.
    pub fn from_reference(reference: &StoreReference) -> Option<Self> {
        if reference.store_type != Self::STORE_TYPE {
            return None;
        }
        let location = reference.location.clone()?;
        let local_storage_options = match reference.option(LOCAL_STORAGE_OPTIONS_KEY) {
            None => LocalStorageOptions::none(),
            Some(raw) => match LocalStorageOptions::parse(raw) {
                Ok(options) => options,
                Err(e) => {
                    debug!(location = %location, error = %e, "unreadable SQLite store options");
                    return None;
                }
            },
        };
        Some(Self {
            location,
            configuration: reference.configuration.clone(),
            local_storage_options,
        })
    }
}

impl StorageInterface for SqliteStorage {
    fn store_type(&self) -> &'static str {
        Self::STORE_TYPE
    }

    fn configuration(&self) -> Option<&str> {
        self.configuration.as_deref()
    }

    fn location(&self) -> Option<&StoreLocation> {
        Some(&self.location)
    }

    fn store_options(&self) -> BTreeMap<String, String> {
        let mut options = BTreeMap::new();
        options.insert(
            LOCAL_STORAGE_OPTIONS_KEY.to_owned(),
            self.local_storage_options.to_bits().to_string(),
        );
        options
    }
}

impl fmt::Display for SqliteStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SQLite store at {}", self.location)?;
        if let Some(configuration) = &self.configuration {
            write!(f, " [{configuration}]")?;
        }
        Ok(())
    }
}

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StorageError, StorageResult};
use crate::handle::StorageHandle;
use crate::memory::InMemoryStorage;
use crate::options::LocalStorageOptions;
use crate::sqlite::SqliteStorage;

/// Which storage kind a configuration describes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    #[default]
    Sqlite,
    InMemory,
}

/// Declarative storage setup, usually read from a TOML file.
///
/// ```toml
/// kind = "sqlite"
/// root_directory = "/var/lib/app"
/// file_name = "main.sqlite"
/// configuration = "Cloud"
///
/// [options]
/// prevent_progressive_migration = true
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage kind to build.
    pub kind: StorageKind,
    /// Directory holding file-backed stores. Relative directories are kept
    /// relative and produce bare-path locations rather than `file://` URIs.
    pub root_directory: PathBuf,
    /// Store file name inside `root_directory`. Defaults to
    /// [`SqliteStorage::DEFAULT_FILE_NAME`].
    pub file_name: Option<String>,
    /// Model configuration to add the store with.
    pub configuration: Option<String>,
    /// Flags for file-backed stores.
    pub options: LocalStorageOptions,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            kind: StorageKind::Sqlite,
            root_directory: PathBuf::from("."),
            file_name: None,
            configuration: None,
            options: LocalStorageOptions::none(),
        }
    }
}

impl StorageConfig {
    /// Configuration for a transient in-memory store.
    pub fn in_memory() -> Self {
        Self {
            kind: StorageKind::InMemory,
            ..Default::default()
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> StorageResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Build the storage handle this configuration describes.
    pub fn build(&self) -> StorageResult<StorageHandle> {
        let handle = match self.kind {
            StorageKind::Sqlite => {
                let file_name = self
                    .file_name
                    .as_deref()
                    .unwrap_or(SqliteStorage::DEFAULT_FILE_NAME);
                if matches!(file_name, "" | "." | "..") || file_name.contains('/') {
                    return Err(StorageError::InvalidConfig(format!(
                        "file_name must be a single path component, got {file_name:?}"
                    )));
                }
                let mut storage = SqliteStorage::in_directory(&self.root_directory, file_name)
                    .with_local_storage_options(self.options);
                if let Some(configuration) = &self.configuration {
                    storage = storage.with_configuration(configuration.clone());
                }
                StorageHandle::from(storage)
            }
            StorageKind::InMemory => {
                if self.file_name.is_some() {
                    return Err(StorageError::InvalidConfig(
                        "file_name is only valid for sqlite storage".into(),
                    ));
                }
                if self.options != LocalStorageOptions::none() {
                    return Err(StorageError::InvalidConfig(
                        "local storage options are only valid for sqlite storage".into(),
                    ));
                }
                let mut storage = InMemoryStorage::new();
                if let Some(configuration) = &self.configuration {
                    storage = storage.with_configuration(configuration.clone());
                }
                StorageHandle::from(storage)
            }
        };
        debug!(storage = %handle, "built storage from configuration");
        Ok(handle)
    }
}

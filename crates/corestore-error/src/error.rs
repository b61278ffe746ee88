use std::io;

use corestore_storage::{StorageError, StorageHandle};
use corestore_types::{SchemaHandle, StoreLocation, TypeError};

use crate::bridge;
use crate::code::{Code, ERROR_DOMAIN};
use crate::opaque::OpaqueError;
use crate::untyped::UntypedError;

/// Every failure the CoreStore storage lifecycle can report.
///
/// The set is closed. Each variant has exactly one [`Code`], and each
/// payload field is required when the error is read back from its
/// untyped form.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CoreStoreError {
    /// The failure could not be classified.
    #[error("an unknown error occurred")]
    Unknown,

    /// A different store already exists where a new one was to be created.
    #[error("a different persistent store already exists at {existing_location}")]
    StoreCollision { existing_location: StoreLocation },

    /// No mapping model exists for the requested migration.
    #[error(
        "no mapping model found to migrate {storage} to {target_model} \
         (version {target_model_version})"
    )]
    MappingModelMissing {
        storage: StorageHandle,
        target_model: SchemaHandle,
        target_model_version: String,
    },

    /// Reaching the current model needs intermediate migrations, but the
    /// storage forbids them.
    #[error("progressive migration is required for {storage} but is disabled")]
    ProgressiveMigrationRequired { storage: StorageHandle },

    /// A failure from outside the taxonomy, carried as-is.
    #[error("internal error: {0}")]
    Wrapped(#[source] OpaqueError),
}

impl CoreStoreError {
    /// Wrap any foreign error.
    pub fn wrap<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CoreStoreError::Wrapped(OpaqueError::new(error))
    }

    pub fn code(&self) -> Code {
        match self {
            CoreStoreError::Unknown => Code::Unknown,
            CoreStoreError::StoreCollision { .. } => Code::StoreCollision,
            CoreStoreError::MappingModelMissing { .. } => Code::MappingModelMissing,
            CoreStoreError::ProgressiveMigrationRequired { .. } => {
                Code::ProgressiveMigrationRequired
            }
            CoreStoreError::Wrapped(_) => Code::Wrapped,
        }
    }

    /// Domain string of this error family.
    pub fn domain(&self) -> &'static str {
        ERROR_DOMAIN
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, CoreStoreError::Unknown)
    }

    /// One-line human-readable rendering.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Multi-line diagnostic listing the untyped form field by field.
    pub fn dump(&self) -> String {
        let untyped = self.to_untyped();
        let mut out = format!(
            "CoreStoreError::{} ({} error {})\n",
            self.code().name(),
            untyped.domain(),
            untyped.code()
        );
        out.push_str(&format!("  description: {self}\n"));
        for (key, value) in untyped.payload() {
            out.push_str(&format!("  {key} ({}): {value}\n", value.type_name()));
        }
        out
    }

    /// Untyped form of this error. See [`bridge::lower`].
    pub fn to_untyped(&self) -> UntypedError {
        bridge::lower(self)
    }
}

impl From<io::Error> for CoreStoreError {
    fn from(error: io::Error) -> Self {
        CoreStoreError::wrap(error)
    }
}

impl From<StorageError> for CoreStoreError {
    fn from(error: StorageError) -> Self {
        CoreStoreError::wrap(error)
    }
}

impl From<TypeError> for CoreStoreError {
    fn from(error: TypeError) -> Self {
        CoreStoreError::wrap(error)
    }
}

impl From<OpaqueError> for CoreStoreError {
    fn from(error: OpaqueError) -> Self {
        bridge::lift(error)
    }
}

impl From<UntypedError> for CoreStoreError {
    fn from(error: UntypedError) -> Self {
        bridge::lift_untyped(&error)
    }
}

impl From<CoreStoreError> for UntypedError {
    fn from(error: CoreStoreError) -> Self {
        bridge::lower(&error)
    }
}

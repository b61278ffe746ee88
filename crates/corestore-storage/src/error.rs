//! Error types for storage descriptor operations.

use thiserror::Error;

/// Errors produced while building storage descriptors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration parsed but describes an unusable storage.
    #[error("invalid storage configuration: {0}")]
    InvalidConfig(String),

    /// A local storage option bitmask contained unknown bits or was not a number.
    #[error("invalid local storage options: {0}")]
    InvalidOptions(String),
}

/// Convenience alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

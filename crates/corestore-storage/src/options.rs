use serde::{Deserialize, Serialize};

use crate::error::{StorageError, StorageResult};

/// Store option key under which [`LocalStorageOptions`] travel in a
/// [`StoreReference`](corestore_types::StoreReference).
pub const LOCAL_STORAGE_OPTIONS_KEY: &str = "localStorageOptions";

const RECREATE_STORE_ON_MODEL_MISMATCH: u32 = 1 << 0;
const PREVENT_PROGRESSIVE_MIGRATION: u32 = 1 << 1;
const ALLOW_SYNCHRONOUS_LIGHTWEIGHT_MIGRATION: u32 = 1 << 2;
const KNOWN_BITS: u32 = RECREATE_STORE_ON_MODEL_MISMATCH
    | PREVENT_PROGRESSIVE_MIGRATION
    | ALLOW_SYNCHRONOUS_LIGHTWEIGHT_MIGRATION;

/// Behavior flags for file-backed stores.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalStorageOptions {
    /// Delete and recreate the store file when its model no longer matches.
    pub recreate_store_on_model_mismatch: bool,
    /// Refuse to migrate through intermediate model versions.
    pub prevent_progressive_migration: bool,
    /// Permit lightweight migration to run on the calling thread.
    pub allow_synchronous_lightweight_migration: bool,
}

impl LocalStorageOptions {
    /// No flags set.
    pub const fn none() -> Self {
        Self {
            recreate_store_on_model_mismatch: false,
            prevent_progressive_migration: false,
            allow_synchronous_lightweight_migration: false,
        }
    }

    /// Packed bitmask form.
    pub fn to_bits(self) -> u32 {
        let mut bits = 0;
        if self.recreate_store_on_model_mismatch {
            bits |= RECREATE_STORE_ON_MODEL_MISMATCH;
        }
        if self.prevent_progressive_migration {
            bits |= PREVENT_PROGRESSIVE_MIGRATION;
        }
        if self.allow_synchronous_lightweight_migration {
            bits |= ALLOW_SYNCHRONOUS_LIGHTWEIGHT_MIGRATION;
        }
        bits
    }

    /// Unpack a bitmask. Unknown bits are rejected.
    pub fn from_bits(bits: u32) -> StorageResult<Self> {
        if bits & !KNOWN_BITS != 0 {
            return Err(StorageError::InvalidOptions(format!(
                "unknown bits {:#x}",
                bits & !KNOWN_BITS
            )));
        }
        Ok(Self {
            recreate_store_on_model_mismatch: bits & RECREATE_STORE_ON_MODEL_MISMATCH != 0,
            prevent_progressive_migration: bits & PREVENT_PROGRESSIVE_MIGRATION != 0,
            allow_synchronous_lightweight_migration: bits
                & ALLOW_SYNCHRONOUS_LIGHTWEIGHT_MIGRATION
                != 0,
        })
    }

    /// Parse the decimal string form stored in store options.
    pub fn parse(s: &str) -> StorageResult<Self> {
        let bits = s
            .parse::<u32>()
            .map_err(|e| StorageError::InvalidOptions(format!("{s:?}: {e}")))?;
        Self::from_bits(bits)
    }
}

//! Deprecated error domain and code names kept for older callers.
//!
//! Nothing here carries its own numbering. Every legacy code is an alias for
//! a [`Code`] and the table is derived from [`Code::ALL`].

#![allow(deprecated)]

use crate::code::{Code, ERROR_DOMAIN};

/// Former name of [`ERROR_DOMAIN`].
#[deprecated(note = "use `ERROR_DOMAIN`")]
pub const LEGACY_ERROR_DOMAIN: &str = ERROR_DOMAIN;

/// Former code names, one per [`Code`].
#[deprecated(note = "use `Code`")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LegacyErrorCode {
    UnknownError,
    DifferentPersistentStoreExistsAtUrl,
    MappingModelNotFound,
    ProgressiveMigrationRequired,
    InternalError,
}

impl LegacyErrorCode {
    /// The current code this name aliases.
    pub fn code(self) -> Code {
        match self {
            LegacyErrorCode::UnknownError => Code::Unknown,
            LegacyErrorCode::DifferentPersistentStoreExistsAtUrl => Code::StoreCollision,
            LegacyErrorCode::MappingModelNotFound => Code::MappingModelMissing,
            LegacyErrorCode::ProgressiveMigrationRequired => Code::ProgressiveMigrationRequired,
            LegacyErrorCode::InternalError => Code::Wrapped,
        }
    }

    pub fn raw(self) -> i64 {
        self.code().raw()
    }

    pub fn from_raw(raw: i64) -> Option<Self> {
        Code::from_raw(raw).map(Self::from)
    }
}

impl From<Code> for LegacyErrorCode {
    fn from(code: Code) -> Self {
        match code {
            Code::Unknown => LegacyErrorCode::UnknownError,
            Code::StoreCollision => LegacyErrorCode::DifferentPersistentStoreExistsAtUrl,
            Code::MappingModelMissing => LegacyErrorCode::MappingModelNotFound,
            Code::ProgressiveMigrationRequired => LegacyErrorCode::ProgressiveMigrationRequired,
            Code::Wrapped => LegacyErrorCode::InternalError,
        }
    }
}

impl From<LegacyErrorCode> for Code {
    fn from(legacy: LegacyErrorCode) -> Self {
        legacy.code()
    }
}

/// Alias table pairing each legacy name with its current code.
#[deprecated(note = "use `Code::ALL`")]
pub fn legacy_code_table() -> [(LegacyErrorCode, Code); 5] {
    Code::ALL.map(|code| (LegacyErrorCode::from(code), code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_alias_matches() {
        assert_eq!(LEGACY_ERROR_DOMAIN, ERROR_DOMAIN);
    }

    #[test]
    fn table_covers_every_code_once() {
        let table = legacy_code_table();
        let codes: Vec<Code> = table.iter().map(|(_, code)| *code).collect();
        assert_eq!(codes, Code::ALL.to_vec());
    }

    #[test]
    fn legacy_names_share_raw_values() {
        for (legacy, code) in legacy_code_table() {
            assert_eq!(legacy.raw(), code.raw());
            assert_eq!(legacy.code(), code);
            assert_eq!(Code::from(legacy), code);
            assert_eq!(LegacyErrorCode::from_raw(code.raw()), Some(legacy));
        }
    }

    #[test]
    fn pinned_legacy_values() {
        assert_eq!(LegacyErrorCode::UnknownError.raw(), 0);
        assert_eq!(LegacyErrorCode::DifferentPersistentStoreExistsAtUrl.raw(), 1);
        assert_eq!(LegacyErrorCode::MappingModelNotFound.raw(), 2);
        assert_eq!(LegacyErrorCode::ProgressiveMigrationRequired.raw(), 3);
        assert_eq!(LegacyErrorCode::InternalError.raw(), 4);
        assert_eq!(LegacyErrorCode::from_raw(5), None);
    }

    #[test]
    fn table_is_stable_across_calls() {
        assert_eq!(legacy_code_table(), legacy_code_table());
    }
}

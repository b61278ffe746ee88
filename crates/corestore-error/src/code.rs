use std::fmt;

/// Domain string identifying CoreStore errors in their untyped form.
pub const ERROR_DOMAIN: &str = "com.corestore.error";

/// Stable integer discriminator for each [`CoreStoreError`](crate::CoreStoreError)
/// variant.
///
/// Untyped errors persist only this number, so values are never reused or
/// reassigned. New variants take the next unused value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i64)]
pub enum Code {
    Unknown = 0,
    StoreCollision = 1,
    MappingModelMissing = 2,
    ProgressiveMigrationRequired = 3,
    Wrapped = 4,
}

impl Code {
    /// Every code, in declaration order.
    pub const ALL: [Code; 5] = [
        Code::Unknown,
        Code::StoreCollision,
        Code::MappingModelMissing,
        Code::ProgressiveMigrationRequired,
        Code::Wrapped,
    ];

    /// The integer carried in untyped errors.
    pub const fn raw(self) -> i64 {
        self as i64
    }

    /// Look up a code by its integer value.
    pub fn from_raw(raw: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.raw() == raw)
    }

    pub fn name(self) -> &'static str {
        match self {
            Code::Unknown => "Unknown",
            Code::StoreCollision => "StoreCollision",
            Code::MappingModelMissing => "MappingModelMissing",
            Code::ProgressiveMigrationRequired => "ProgressiveMigrationRequired",
            Code::Wrapped => "Wrapped",
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.raw())
    }
}

impl TryFrom<i64> for Code {
    type Error = i64;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::from_raw(raw).ok_or(raw)
    }
}

impl From<Code> for i64 {
    fn from(code: Code) -> Self {
        code.raw()
    }
}

//! Shared handle to an error this crate does not own.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreStoreError;
use crate::untyped::UntypedError;

/// A foreign error carried verbatim.
///
/// Cloning shares the underlying error. Two handles are equal when they
/// share the same error, or when both hold an [`UntypedError`] or a
/// [`CoreStoreError`] that compare equal structurally.
#[derive(Clone)]
pub struct OpaqueError(Arc<dyn Error + Send + Sync + 'static>);

impl OpaqueError {
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self(Arc::new(error))
    }

    /// Share an error that is already behind an `Arc`.
    pub fn from_arc(error: Arc<dyn Error + Send + Sync + 'static>) -> Self {
        Self(error)
    }

    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: Error + 'static,
    {
        self.0.downcast_ref::<T>()
    }

    pub fn is<T>(&self) -> bool
    where
        T: Error + 'static,
    {
        self.0.is::<T>()
    }

    /// Returns `true` if both handles share the same error value.
    pub fn ptr_eq(&self, other: &OpaqueError) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn as_dyn(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.0
    }
}

impl fmt::Debug for OpaqueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for OpaqueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl Error for OpaqueError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}

impl PartialEq for OpaqueError {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        if let (Some(a), Some(b)) = (
            self.downcast_ref::<UntypedError>(),
            other.downcast_ref::<UntypedError>(),
        ) {
            return a == b;
        }
        if let (Some(a), Some(b)) = (
            self.downcast_ref::<CoreStoreError>(),
            other.downcast_ref::<CoreStoreError>(),
        ) {
            return a == b;
        }
        false
    }
}

impl From<Box<dyn Error + Send + Sync + 'static>> for OpaqueError {
    fn from(error: Box<dyn Error + Send + Sync + 'static>) -> Self {
        Self(Arc::from(error))
    }
}

/// Errors persist as their description. Reading one back yields a
/// [`RecordedError`] with that description.
impl Serialize for OpaqueError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OpaqueError {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let description = String::deserialize(deserializer)?;
        Ok(OpaqueError::new(RecordedError::new(description)))
    }
}

/// An error known only by its rendered description.
///
/// Produced when an untyped error is read back from its persisted form and
/// the original error value is no longer available.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{description}")]
pub struct RecordedError {
    pub description: String,
}

impl RecordedError {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::io;

    #[test]
    fn clones_share_identity() {
        let a = OpaqueError::new(io::Error::new(io::ErrorKind::Other, "disk full"));
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_foreign_errors_are_not_equal() {
        let a = OpaqueError::new(io::Error::new(io::ErrorKind::Other, "disk full"));
        let b = OpaqueError::new(io::Error::new(io::ErrorKind::Other, "disk full"));
        assert_ne!(a, b);
    }

    #[test]
    fn untyped_errors_compare_structurally() {
        let a = OpaqueError::new(UntypedError::new("other.domain", 1, BTreeMap::new()));
        let b = OpaqueError::new(UntypedError::new("other.domain", 1, BTreeMap::new()));
        let c = OpaqueError::new(UntypedError::new("other.domain", 2, BTreeMap::new()));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn typed_errors_compare_structurally() {
        let a = OpaqueError::new(CoreStoreError::Unknown);
        let b = OpaqueError::new(CoreStoreError::Unknown);
        assert_eq!(a, b);
    }

    #[test]
    fn downcast_reaches_inner_error() {
        let opaque = OpaqueError::new(RecordedError::new("boom"));
        assert!(opaque.is::<RecordedError>());
        assert_eq!(
            opaque.downcast_ref::<RecordedError>().map(|e| e.description.as_str()),
            Some("boom")
        );
        assert!(opaque.downcast_ref::<io::Error>().is_none());
    }

    #[test]
    fn display_and_debug_delegate() {
        let opaque = OpaqueError::new(RecordedError::new("boom"));
        assert_eq!(opaque.to_string(), "boom");
        assert!(format!("{opaque:?}").contains("RecordedError"));
    }

    #[test]
    fn serializes_as_description() {
        let opaque = OpaqueError::new(io::Error::new(io::ErrorKind::Other, "disk full"));
        assert_eq!(serde_json::to_string(&opaque).unwrap(), "\"disk full\"");

        let restored: OpaqueError = serde_json::from_str("\"disk full\"").unwrap();
        assert_eq!(
            restored.downcast_ref::<RecordedError>(),
            Some(&RecordedError::new("disk full"))
        );
    }

    #[test]
    fn from_boxed_error() {
        let boxed: Box<dyn Error + Send + Sync> = "plain message".into();
        let opaque = OpaqueError::from(boxed);
        assert_eq!(opaque.to_string(), "plain message");
    }
}

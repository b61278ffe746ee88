use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

const FILE_SCHEME: &str = "file://";

/// Location of a persistent store, kept as the URI string the caller gave.
///
/// The error layer carries locations verbatim. No normalization happens on
/// construction, so two locations are equal only if their text is equal.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreLocation(String);

impl StoreLocation {
    /// Wrap a URI or bare path string.
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Location for a filesystem path.
    ///
    /// Absolute paths become `file://` URIs. Relative paths stay bare, since
    /// a file URI has no way to express them; they still count as files.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.is_absolute() {
            Self(format!("{FILE_SCHEME}{}", path.display()))
        } else {
            Self(path.display().to_string())
        }
    }

    /// The raw URI text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this location names a local file.
    ///
    /// Bare paths (no scheme) count as files.
    pub fn is_file(&self) -> bool {
        self.0.starts_with(FILE_SCHEME) || !self.0.contains("://")
    }

    /// Filesystem path for file locations.
    pub fn to_file_path(&self) -> Result<PathBuf, TypeError> {
        if let Some(rest) = self.0.strip_prefix(FILE_SCHEME) {
            return Ok(PathBuf::from(rest));
        }
        if self.0.contains("://") {
            return Err(TypeError::NotAFileLocation(self.0.clone()));
        }
        Ok(PathBuf::from(&self.0))
    }

    /// Last path component, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.0
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
    }
}

impl fmt::Debug for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StoreLocation({})", self.0)
    }
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StoreLocation {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

impl From<String> for StoreLocation {
    fn from(uri: String) -> Self {
        Self(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_text_verbatim() {
        let loc = StoreLocation::new("/data/store.db");
        assert_eq!(loc.as_str(), "/data/store.db");
        assert_eq!(loc.to_string(), "/data/store.db");
    }

    #[test]
    fn from_path_adds_file_scheme() {
        let loc = StoreLocation::from_path("/tmp/app/main.sqlite");
        assert_eq!(loc.as_str(), "file:///tmp/app/main.sqlite");
        assert!(loc.is_file());
        assert_eq!(
            loc.to_file_path().unwrap(),
            PathBuf::from("/tmp/app/main.sqlite")
        );
    }

    #[test]
    fn relative_path_stays_bare() {
        let loc = StoreLocation::from_path("./data/main.sqlite");
        assert_eq!(loc.as_str(), "./data/main.sqlite");
        assert!(loc.is_file());
        assert_eq!(
            loc.to_file_path().unwrap(),
            PathBuf::from("./data/main.sqlite")
        );
    }

    #[test]
    fn bare_path_is_a_file() {
        let loc = StoreLocation::from("/data/store.db");
        assert!(loc.is_file());
        assert_eq!(loc.to_file_path().unwrap(), PathBuf::from("/data/store.db"));
    }

    #[test]
    fn remote_location_is_not_a_file() {
        let loc = StoreLocation::from("https://example.com/store");
        assert!(!loc.is_file());
        let err = loc.to_file_path().unwrap_err();
        assert!(matches!(err, TypeError::NotAFileLocation(_)));
    }

    #[test]
    fn file_name_is_last_component() {
        assert_eq!(
            StoreLocation::from("file:///a/b/c.sqlite").file_name(),
            Some("c.sqlite")
        );
        assert_eq!(StoreLocation::from("/a/b/").file_name(), None);
    }

    #[test]
    fn serde_is_transparent() {
        let loc = StoreLocation::from("/data/store.db");
        let json = serde_json::to_string(&loc).unwrap();
        assert_eq!(json, "\"/data/store.db\"");
        let parsed: StoreLocation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, loc);
    }
}

//! Opaque external form of a configured storage.
//!
//! A `StoreReference` is what the surrounding framework hands around when it
//! talks about "a persistent store": a type name, where it lives, which model
//! configuration it was added with, and its string options. Recovering a
//! typed storage from a reference is the storage crate's job.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::location::StoreLocation;

/// Untyped description of a persistent store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreReference {
    /// Store type identifier (e.g. "SQLite", "InMemory").
    pub store_type: String,
    /// Where the store lives, for stores backed by a location.
    pub location: Option<StoreLocation>,
    /// Model configuration the store was added with.
    pub configuration: Option<String>,
    /// Store options as string pairs.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl StoreReference {
    /// A reference with only a store type set.
    pub fn new(store_type: impl Into<String>) -> Self {
        Self {
            store_type: store_type.into(),
            location: None,
            configuration: None,
            options: BTreeMap::new(),
        }
    }

    pub fn with_location(mut self, location: StoreLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = Some(configuration.into());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Look up a single option value.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}

impl fmt::Display for StoreReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.store_type)?;
        if let Some(location) = &self.location {
            write!(f, " at {location}")?;
        }
        if let Some(configuration) = &self.configuration {
            write!(f, " [{configuration}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let reference = StoreReference::new("SQLite")
            .with_location(StoreLocation::from("/data/store.db"))
            .with_configuration("Default")
            .with_option("journal_mode", "WAL");
        assert_eq!(reference.store_type, "SQLite");
        assert_eq!(reference.location, Some(StoreLocation::from("/data/store.db")));
        assert_eq!(reference.configuration.as_deref(), Some("Default"));
        assert_eq!(reference.option("journal_mode"), Some("WAL"));
        assert_eq!(reference.option("missing"), None);
    }

    #[test]
    fn display_includes_location_and_configuration() {
        let reference = StoreReference::new("SQLite")
            .with_location(StoreLocation::from("/data/store.db"))
            .with_configuration("Cloud");
        assert_eq!(reference.to_string(), "SQLite at /data/store.db [Cloud]");
        assert_eq!(StoreReference::new("InMemory").to_string(), "InMemory");
    }

    #[test]
    fn serde_roundtrip() {
        let reference = StoreReference::new("SQLite")
            .with_location(StoreLocation::from("/data/store.db"))
            .with_option("localStorageOptions", "2");
        let json = serde_json::to_string(&reference).unwrap();
        let parsed: StoreReference = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, reference);
    }

    #[test]
    fn missing_options_default_to_empty() {
        let json = r#"{"store_type":"InMemory","location":null,"configuration":null}"#;
        let parsed: StoreReference = serde_json::from_str(json).unwrap();
        assert!(parsed.options.is_empty());
    }
}

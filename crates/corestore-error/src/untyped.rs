//! The legacy untyped error form: domain, integer code and payload map.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

use corestore_types::{SchemaHandle, StoreLocation, StoreReference};
use serde::{Deserialize, Serialize};

use crate::code::ERROR_DOMAIN;
use crate::opaque::OpaqueError;

/// Payload keys written by [`lower`](crate::lower) and read by
/// [`lift`](crate::lift).
pub mod keys {
    /// Location of the store that blocked a new one ([`StoreCollision`]).
    ///
    /// [`StoreCollision`]: crate::CoreStoreError::StoreCollision
    pub const EXISTING_PERSISTENT_STORE_URL: &str = "existingPersistentStoreURL";
    /// External form of the storage involved in a migration failure.
    pub const STORAGE: &str = "storage";
    pub const TARGET_MODEL: &str = "targetModel";
    pub const TARGET_MODEL_VERSION: &str = "targetModelVersion";
    /// The foreign error carried by a wrapped failure.
    pub const WRAPPED_ERROR: &str = "NSError";
}

/// A single payload entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PayloadValue {
    Text(String),
    Integer(i64),
    Url(StoreLocation),
    Store(StoreReference),
    Schema(SchemaHandle),
    Error(OpaqueError),
}

impl PayloadValue {
    /// Short name of the value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            PayloadValue::Text(_) => "text",
            PayloadValue::Integer(_) => "integer",
            PayloadValue::Url(_) => "url",
            PayloadValue::Store(_) => "store",
            PayloadValue::Schema(_) => "schema",
            PayloadValue::Error(_) => "error",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PayloadValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PayloadValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_url(&self) -> Option<&StoreLocation> {
        match self {
            PayloadValue::Url(location) => Some(location),
            _ => None,
        }
    }

    pub fn as_store(&self) -> Option<&StoreReference> {
        match self {
            PayloadValue::Store(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn as_schema(&self) -> Option<&SchemaHandle> {
        match self {
            PayloadValue::Schema(schema) => Some(schema),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&OpaqueError> {
        match self {
            PayloadValue::Error(error) => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for PayloadValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadValue::Text(s) => write!(f, "{s:?}"),
            PayloadValue::Integer(n) => write!(f, "{n}"),
            PayloadValue::Url(location) => write!(f, "{location}"),
            PayloadValue::Store(reference) => write!(f, "{reference}"),
            PayloadValue::Schema(schema) => write!(f, "{schema}"),
            PayloadValue::Error(error) => write!(f, "{error}"),
        }
    }
}

impl From<&str> for PayloadValue {
    fn from(s: &str) -> Self {
        PayloadValue::Text(s.to_owned())
    }
}

impl From<String> for PayloadValue {
    fn from(s: String) -> Self {
        PayloadValue::Text(s)
    }
}

impl From<i64> for PayloadValue {
    fn from(n: i64) -> Self {
        PayloadValue::Integer(n)
    }
}

impl From<StoreLocation> for PayloadValue {
    fn from(location: StoreLocation) -> Self {
        PayloadValue::Url(location)
    }
}

impl From<StoreReference> for PayloadValue {
    fn from(reference: StoreReference) -> Self {
        PayloadValue::Store(reference)
    }
}

impl From<SchemaHandle> for PayloadValue {
    fn from(schema: SchemaHandle) -> Self {
        PayloadValue::Schema(schema)
    }
}

impl From<OpaqueError> for PayloadValue {
    fn from(error: OpaqueError) -> Self {
        PayloadValue::Error(error)
    }
}

/// Payload map of an untyped error. Ordered so rendering is deterministic.
pub type Payload = BTreeMap<String, PayloadValue>;

/// An error in the legacy domain/code/payload form.
///
/// Values are immutable once built; equality is structural over all three
/// parts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UntypedError {
    domain: String,
    code: i64,
    #[serde(default)]
    payload: Payload,
}

impl UntypedError {
    pub fn new(domain: impl Into<String>, code: i64, payload: Payload) -> Self {
        Self {
            domain: domain.into(),
            code,
            payload,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.payload.get(key)
    }

    /// Returns `true` if this error belongs to [`ERROR_DOMAIN`].
    pub fn is_corestore(&self) -> bool {
        self.domain == ERROR_DOMAIN
    }

    /// JSON form used when persisting errors.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Read back an error written by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl fmt::Display for UntypedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "operation could not be completed ({} error {})",
            self.domain, self.code
        )
    }
}

impl Error for UntypedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        let wrapped = self.payload.get(keys::WRAPPED_ERROR)?.as_error()?;
        Some(wrapped.as_dyn())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opaque::RecordedError;

    fn payload(entries: Vec<(&str, PayloadValue)>) -> Payload {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v))
            .collect()
    }

    #[test]
    fn accessors() {
        let err = UntypedError::new(
            ERROR_DOMAIN,
            1,
            payload(vec![(keys::EXISTING_PERSISTENT_STORE_URL, "x".into())]),
        );
        assert_eq!(err.domain(), "com.corestore.error");
        assert_eq!(err.code(), 1);
        assert!(err.is_corestore());
        assert_eq!(
            err.get(keys::EXISTING_PERSISTENT_STORE_URL),
            Some(&PayloadValue::Text("x".into()))
        );
        assert!(err.get("missing").is_none());
    }

    #[test]
    fn equality_is_structural() {
        let a = UntypedError::new("d", 1, payload(vec![("k", PayloadValue::Integer(7))]));
        let b = UntypedError::new("d", 1, payload(vec![("k", PayloadValue::Integer(7))]));
        let c = UntypedError::new("d", 1, payload(vec![("k", PayloadValue::Integer(8))]));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, UntypedError::new("e", 1, a.payload().clone()));
    }

    #[test]
    fn display_mentions_domain_and_code() {
        let err = UntypedError::new("other.domain", 42, Payload::new());
        assert_eq!(
            err.to_string(),
            "operation could not be completed (other.domain error 42)"
        );
    }

    #[test]
    fn source_is_wrapped_error() {
        let err = UntypedError::new(
            ERROR_DOMAIN,
            4,
            payload(vec![(
                keys::WRAPPED_ERROR,
                OpaqueError::new(RecordedError::new("inner")).into(),
            )]),
        );
        assert_eq!(err.source().map(|e| e.to_string()), Some("inner".into()));
        assert!(UntypedError::new(ERROR_DOMAIN, 0, Payload::new()).source().is_none());
    }

    #[test]
    fn typed_accessors_reject_other_types() {
        let value = PayloadValue::Integer(3);
        assert_eq!(value.as_integer(), Some(3));
        assert!(value.as_text().is_none());
        assert!(value.as_url().is_none());
        assert!(value.as_store().is_none());
        assert!(value.as_schema().is_none());
        assert!(value.as_error().is_none());
        assert_eq!(value.type_name(), "integer");
    }

    #[test]
    fn json_shape_is_tagged() {
        let err = UntypedError::new(
            ERROR_DOMAIN,
            1,
            payload(vec![(
                keys::EXISTING_PERSISTENT_STORE_URL,
                StoreLocation::from("/data/store.db").into(),
            )]),
        );
        let json: serde_json::Value = serde_json::from_str(&err.to_json().unwrap()).unwrap();
        assert_eq!(json["domain"], "com.corestore.error");
        assert_eq!(json["code"], 1);
        assert_eq!(
            json["payload"]["existingPersistentStoreURL"],
            serde_json::json!({"type": "url", "value": "/data/store.db"})
        );
    }

    #[test]
    fn json_roundtrip_without_errors() {
        let err = UntypedError::new(
            ERROR_DOMAIN,
            2,
            payload(vec![
                (keys::STORAGE, StoreReference::new("InMemory").into()),
                (keys::TARGET_MODEL, SchemaHandle::new("Model", ["A"]).into()),
                (keys::TARGET_MODEL_VERSION, "2".into()),
            ]),
        );
        let parsed = UntypedError::from_json(&err.to_json().unwrap()).unwrap();
        assert_eq!(parsed, err);
    }

    #[test]
    fn errors_persist_as_descriptions() {
        let err = UntypedError::new(
            ERROR_DOMAIN,
            4,
            payload(vec![(
                keys::WRAPPED_ERROR,
                OpaqueError::new(RecordedError::new("disk full")).into(),
            )]),
        );
        let json = err.to_json().unwrap();
        assert!(json.contains(r#""value":"disk full""#));

        let parsed = UntypedError::from_json(&json).unwrap();
        let restored = parsed.get(keys::WRAPPED_ERROR).and_then(PayloadValue::as_error).unwrap();
        assert_eq!(
            restored.downcast_ref::<RecordedError>(),
            Some(&RecordedError::new("disk full"))
        );
    }

    #[test]
    fn missing_payload_defaults_to_empty() {
        let parsed = UntypedError::from_json(r#"{"domain":"d","code":3}"#).unwrap();
        assert!(parsed.payload().is_empty());
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// BLAKE3 digest identifying the shape of a schema.
///
/// Two schemas with the same name and the same set of entities share a
/// fingerprint regardless of the order the entities were listed in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaFingerprint([u8; 32]);

impl SchemaFingerprint {
    /// Derive a fingerprint from a schema name and its entity names.
    pub fn derive<I, S>(name: &str, entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = entities
            .into_iter()
            .map(|e| e.as_ref().to_owned())
            .collect();
        names.sort();
        names.dedup();

        let mut hasher = blake3::Hasher::new();
        hasher.update(b"corestore-schema-v1:");
        hasher.update(name.as_bytes());
        for entity in &names {
            hasher.update(b"\0");
            hasher.update(entity.as_bytes());
        }
        Self(*hasher.finalize().as_bytes())
    }

    /// Leading 8 hex characters, used when rendering a handle.
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Debug for SchemaFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SchemaFingerprint")
            .field(&self.short_hex())
            .finish()
    }
}

/// Identifier for a persistence schema (a "model" in framework terms).
///
/// The error layer carries schema handles verbatim; it never inspects the
/// fingerprint beyond equality and display.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaHandle {
    name: String,
    fingerprint: SchemaFingerprint,
}

impl SchemaHandle {
    /// Build a handle for a schema with the given entity names.
    pub fn new<I, S>(name: impl Into<String>, entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        let fingerprint = SchemaFingerprint::derive(&name, entities);
        Self { name, fingerprint }
    }

    /// Build a handle from a known fingerprint.
    pub fn from_parts(name: impl Into<String>, fingerprint: SchemaFingerprint) -> Self {
        Self {
            name: name.into(),
            fingerprint,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fingerprint(&self) -> SchemaFingerprint {
        self.fingerprint
    }
}

impl fmt::Display for SchemaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.fingerprint.short_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_deterministic() {
        let a = SchemaFingerprint::derive("Model", ["Person", "Pet"]);
        let b = SchemaFingerprint::derive("Model", ["Person", "Pet"]);
        assert_eq!(a, b);
    }

    #[test]
    fn fingerprint_ignores_entity_order() {
        let a = SchemaFingerprint::derive("Model", ["Person", "Pet"]);
        let b = SchemaFingerprint::derive("Model", ["Pet", "Person"]);
        assert_eq!(a, b);
    }

    #[test]
    fn fingerprint_depends_on_name_and_entities() {
        let base = SchemaFingerprint::derive("Model", ["Person"]);
        assert_ne!(base, SchemaFingerprint::derive("ModelV2", ["Person"]));
        assert_ne!(base, SchemaFingerprint::derive("Model", ["Person", "Pet"]));
    }

    #[test]
    fn entity_boundaries_are_separated() {
        let a = SchemaFingerprint::derive("M", ["ab", "c"]);
        let b = SchemaFingerprint::derive("M", ["a", "bc"]);
        assert_ne!(a, b);
    }

    #[test]
    fn short_hex_is_a_digest_prefix() {
        let fp = SchemaFingerprint::derive("Model", ["Person"]);
        let short = fp.short_hex();
        assert_eq!(short.len(), 8);
        assert!(short.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(format!("{fp:?}"), format!("SchemaFingerprint({short:?})"));
    }

    #[test]
    fn handle_accessors_and_display() {
        let handle = SchemaHandle::new("ModelV2", ["Person", "Pet"]);
        assert_eq!(handle.name(), "ModelV2");
        assert_eq!(
            handle.fingerprint(),
            SchemaFingerprint::derive("ModelV2", ["Pet", "Person"])
        );
        assert_eq!(
            handle.to_string(),
            format!("ModelV2 ({})", handle.fingerprint().short_hex())
        );
    }

    #[test]
    fn handle_from_parts_matches_new() {
        let fp = SchemaFingerprint::derive("Model", ["A"]);
        assert_eq!(
            SchemaHandle::from_parts("Model", fp),
            SchemaHandle::new("Model", ["A"])
        );
    }

    #[test]
    fn handle_serde_roundtrip() {
        let handle = SchemaHandle::new("Model", ["Person"]);
        let json = serde_json::to_string(&handle).unwrap();
        let parsed: SchemaHandle = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, handle);
    }
}

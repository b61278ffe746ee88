//! Conversion between [`CoreStoreError`] and [`UntypedError`].
//!
//! Both directions are total. Lowering always succeeds. Lifting never
//! fails: anything it cannot read as a CoreStore error becomes
//! [`CoreStoreError::Wrapped`] (foreign errors) or [`CoreStoreError::Unknown`]
//! (CoreStore errors with an unknown code or a bad payload). A typed value is
//! either fully populated or not produced at all.

use corestore_storage::{BuiltinResolver, StorageHandle, StorageInterface, StorageResolver};
use corestore_types::{SchemaHandle, StoreLocation, StoreReference};
use tracing::{debug, trace};

use crate::code::{Code, ERROR_DOMAIN};
use crate::error::CoreStoreError;
use crate::opaque::OpaqueError;
use crate::untyped::{keys, Payload, PayloadValue, UntypedError};

/// Convert a typed error to its untyped form.
///
/// A wrapped error that already is an [`UntypedError`] is returned as-is
/// rather than wrapped a second time.
pub fn lower(error: &CoreStoreError) -> UntypedError {
    let mut payload = Payload::new();
    match error {
        CoreStoreError::Unknown => {}
        CoreStoreError::StoreCollision { existing_location } => {
            payload.insert(
                keys::EXISTING_PERSISTENT_STORE_URL.to_owned(),
                PayloadValue::Url(existing_location.clone()),
            );
        }
        CoreStoreError::MappingModelMissing {
            storage,
            target_model,
            target_model_version,
        } => {
            payload.insert(
                keys::STORAGE.to_owned(),
                PayloadValue::Store(storage.external_form()),
            );
            payload.insert(
                keys::TARGET_MODEL.to_owned(),
                PayloadValue::Schema(target_model.clone()),
            );
            payload.insert(
                keys::TARGET_MODEL_VERSION.to_owned(),
                PayloadValue::Text(target_model_version.clone()),
            );
        }
        CoreStoreError::ProgressiveMigrationRequired { storage } => {
            payload.insert(
                keys::STORAGE.to_owned(),
                PayloadValue::Store(storage.external_form()),
            );
        }
        CoreStoreError::Wrapped(inner) => {
            if let Some(untyped) = inner.downcast_ref::<UntypedError>() {
                return untyped.clone();
            }
            payload.insert(
                keys::WRAPPED_ERROR.to_owned(),
                PayloadValue::Error(inner.clone()),
            );
        }
    }
    UntypedError::new(ERROR_DOMAIN, error.code().raw(), payload)
}

/// Convert any error to a typed one, resolving storages with the
/// [`BuiltinResolver`].
pub fn lift(error: OpaqueError) -> CoreStoreError {
    lift_with(&BuiltinResolver, error)
}

/// Convert any error to a typed one.
///
/// 1. A boxed [`CoreStoreError`] is returned unchanged.
/// 2. Anything that is not an [`UntypedError`] of [`ERROR_DOMAIN`] is
///    returned as [`CoreStoreError::Wrapped`].
/// 3. Otherwise the code and payload are decoded, degrading to
///    [`CoreStoreError::Unknown`] on any mismatch.
pub fn lift_with<R>(resolver: &R, error: OpaqueError) -> CoreStoreError
where
    R: StorageResolver + ?Sized,
{
    if let Some(typed) = error.downcast_ref::<CoreStoreError>() {
        return typed.clone();
    }
    match error.downcast_ref::<UntypedError>() {
        Some(untyped) if untyped.is_corestore() => decode(resolver, untyped),
        Some(untyped) => {
            trace!(domain = untyped.domain(), code = untyped.code(), "foreign error domain; wrapping");
            CoreStoreError::Wrapped(error)
        }
        None => {
            trace!(error = %error, "non-domain error; wrapping");
            CoreStoreError::Wrapped(error)
        }
    }
}

/// [`lift`] for an untyped error held by reference.
pub fn lift_untyped(error: &UntypedError) -> CoreStoreError {
    lift_untyped_with(&BuiltinResolver, error)
}

/// [`lift_with`] for an untyped error held by reference.
///
/// Foreign errors are cloned into the returned [`CoreStoreError::Wrapped`].
pub fn lift_untyped_with<R>(resolver: &R, error: &UntypedError) -> CoreStoreError
where
    R: StorageResolver + ?Sized,
{
    if error.is_corestore() {
        decode(resolver, error)
    } else {
        trace!(domain = error.domain(), code = error.code(), "foreign error domain; wrapping");
        CoreStoreError::Wrapped(OpaqueError::new(error.clone()))
    }
}

fn decode<R>(resolver: &R, error: &UntypedError) -> CoreStoreError
where
    R: StorageResolver + ?Sized,
{
    let Some(code) = Code::from_raw(error.code()) else {
        debug!(code = error.code(), "unrecognized error code; degrading to Unknown");
        return CoreStoreError::Unknown;
    };
    let fields = Fields {
        payload: error.payload(),
        code,
    };
    decode_fields(resolver, code, &fields).unwrap_or(CoreStoreError::Unknown)
}

fn decode_fields<R>(resolver: &R, code: Code, fields: &Fields<'_>) -> Option<CoreStoreError>
where
    R: StorageResolver + ?Sized,
{
    let error = match code {
        Code::Unknown => CoreStoreError::Unknown,
        Code::StoreCollision => CoreStoreError::StoreCollision {
            existing_location: fields.url(keys::EXISTING_PERSISTENT_STORE_URL)?.clone(),
        },
        Code::MappingModelMissing => CoreStoreError::MappingModelMissing {
            storage: fields.storage(resolver, keys::STORAGE)?,
            target_model: fields.schema(keys::TARGET_MODEL)?.clone(),
            target_model_version: fields.text(keys::TARGET_MODEL_VERSION)?.to_owned(),
        },
        Code::ProgressiveMigrationRequired => CoreStoreError::ProgressiveMigrationRequired {
            storage: fields.storage(resolver, keys::STORAGE)?,
        },
        Code::Wrapped => CoreStoreError::Wrapped(fields.error(keys::WRAPPED_ERROR)?.clone()),
    };
    Some(error)
}

/// Typed, logged access to required payload fields.
struct Fields<'a> {
    payload: &'a Payload,
    code: Code,
}

impl<'a> Fields<'a> {
    fn required<T: ?Sized>(
        &self,
        key: &str,
        expected: &'static str,
        extract: impl FnOnce(&'a PayloadValue) -> Option<&'a T>,
    ) -> Option<&'a T> {
        let Some(value) = self.payload.get(key) else {
            debug!(code = %self.code, key, "required payload field missing; degrading to Unknown");
            return None;
        };
        let extracted = extract(value);
        if extracted.is_none() {
            debug!(
                code = %self.code,
                key,
                expected,
                found = value.type_name(),
                "payload field has wrong type; degrading to Unknown"
            );
        }
        extracted
    }

    fn text(&self, key: &str) -> Option<&'a str> {
        self.required(key, "text", PayloadValue::as_text)
    }

    fn url(&self, key: &str) -> Option<&'a StoreLocation> {
        self.required(key, "url", PayloadValue::as_url)
    }

    fn schema(&self, key: &str) -> Option<&'a SchemaHandle> {
        self.required(key, "schema", PayloadValue::as_schema)
    }

    fn error(&self, key: &str) -> Option<&'a OpaqueError> {
        self.required(key, "error", PayloadValue::as_error)
    }

    fn store(&self, key: &str) -> Option<&'a StoreReference> {
        self.required(key, "store", PayloadValue::as_store)
    }

    fn storage<R>(&self, resolver: &R, key: &str) -> Option<StorageHandle>
    where
        R: StorageResolver + ?Sized,
    {
        let reference = self.store(key)?;
        let storage = resolver.resolve(reference);
        if storage.is_none() {
            debug!(
                code = %self.code,
                key,
                store_type = %reference.store_type,
                "store reference does not resolve to a known storage; degrading to Unknown"
            );
        }
        storage
    }
}

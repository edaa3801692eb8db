//! Discriminator-to-decoder table for polymorphic access decoding.
//!
//! A process-wide registry is populated with the built-in kinds on first use
//! and may be extended at startup via [`register_extension`]. Decoding is a
//! pure function of the input plus the decoder table: unknown discriminators
//! never fail, they fall through to [`Access::Unknown`].

use crate::access::{
    access_type, Access, AccessError, GithubAccess, LocalFilesystemBlobAccess, OciAccess,
    RelativeOciAccess,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::{OnceLock, PoisonError, RwLock};

/// Decoder for one access kind. Receives the full mapping, discriminator
/// included, and must tolerate extra fields.
pub type AccessDecoder = fn(&Map<String, Value>) -> Result<Access, AccessError>;

/// Maps a `type` discriminator to the decoder for that access kind.
#[derive(Debug, Clone)]
pub struct AccessRegistry {
    decoders: BTreeMap<String, AccessDecoder>,
}

impl AccessRegistry {
    /// Registry with no decoders; every kind decodes to [`Access::Unknown`].
    pub fn empty() -> Self {
        Self {
            decoders: BTreeMap::new(),
        }
    }

    /// Registry with the built-in access kinds registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(access_type::OCI_REGISTRY, decode_oci);
        registry.register(access_type::RELATIVE_OCI_REFERENCE, decode_relative_oci);
        registry.register(access_type::GITHUB, decode_github);
        registry.register(access_type::LOCAL_FILESYSTEM_BLOB, decode_local_blob);
        registry
    }

    pub fn register(&mut self, discriminator: impl Into<String>, decoder: AccessDecoder) {
        self.decoders.insert(discriminator.into(), decoder);
    }

    /// Decode a raw `access` value.
    ///
    /// Null input and the explicit `{"type": "None"}` marker both yield
    /// [`Access::None`]. A mapping with a registered discriminator goes
    /// through its decoder; any other discriminator is retained verbatim as
    /// [`Access::Unknown`].
    pub fn decode(&self, raw: Option<&Value>) -> Result<Access, AccessError> {
        let value = match raw {
            None | Some(Value::Null) => return Ok(Access::None),
            Some(value) => value,
        };
        let Value::Object(fields) = value else {
            return Err(AccessError::NotAMapping(json_kind(value)));
        };
        let Some(kind) = fields.get("type").and_then(Value::as_str) else {
            return Err(AccessError::MissingType);
        };
        if kind == access_type::NONE {
            return Ok(Access::None);
        }
        match self.decoders.get(kind) {
            Some(decoder) => decoder(fields),
            None => Ok(Access::Unknown(fields.clone())),
        }
    }
}

impl Default for AccessRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

static GLOBAL: OnceLock<RwLock<AccessRegistry>> = OnceLock::new();

/// Process-wide registry consulted by `Access` deserialization.
pub fn global() -> &'static RwLock<AccessRegistry> {
    GLOBAL.get_or_init(|| RwLock::new(AccessRegistry::with_defaults()))
}

/// Register an extension decoder in the process-wide registry.
///
/// Intended to run at startup, before descriptors are deserialized
/// concurrently; the table is read-only afterwards.
pub fn register_extension(discriminator: impl Into<String>, decoder: AccessDecoder) {
    global()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(discriminator, decoder);
}

/// Decode through the process-wide registry.
pub fn decode(raw: Option<&Value>) -> Result<Access, AccessError> {
    global()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .decode(raw)
}

fn decode_oci(fields: &Map<String, Value>) -> Result<Access, AccessError> {
    from_fields(access_type::OCI_REGISTRY, fields).map(Access::Oci)
}

fn decode_relative_oci(fields: &Map<String, Value>) -> Result<Access, AccessError> {
    from_fields(access_type::RELATIVE_OCI_REFERENCE, fields).map(Access::RelativeOci)
}

fn decode_github(fields: &Map<String, Value>) -> Result<Access, AccessError> {
    from_fields(access_type::GITHUB, fields).map(Access::Github)
}

fn decode_local_blob(fields: &Map<String, Value>) -> Result<Access, AccessError> {
    from_fields(access_type::LOCAL_FILESYSTEM_BLOB, fields).map(Access::LocalFilesystemBlob)
}

/// Deserialize a variant payload from the mapping, discriminator stripped.
/// The variant re-tags itself on serialization, so dropping it here keeps
/// the payload's extension-field capture free of the `type` key.
fn from_fields<T: DeserializeOwned>(
    kind: &str,
    fields: &Map<String, Value>,
) -> Result<T, AccessError> {
    let mut payload = fields.clone();
    payload.remove("type");
    serde_json::from_value(Value::Object(payload)).map_err(|e| AccessError::MalformedVariant {
        kind: kind.to_owned(),
        reason: e.to_string(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

use crate::component::Component;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DescriptorError {
    /// A structurally required field is absent or has the wrong shape.
    #[error("malformed component descriptor: {0}")]
    Malformed(String),
    /// `meta.schemaVersion` is not in the supported set. Fatal at load time,
    /// independent of any validation mode.
    #[error("unsupported schema version: {0}")]
    UnrecognizedSchemaVersion(String),
    #[error("failed to serialize component descriptor: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Supported descriptor schema versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SchemaVersion {
    V2,
}

impl SchemaVersion {
    /// Parse a schema version tag (e.g. "v2").
    pub fn parse(s: &str) -> Result<Self, DescriptorError> {
        match s {
            "v2" => Ok(Self::V2),
            _ => Err(DescriptorError::UnrecognizedSchemaVersion(s.to_owned())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::V2 => "v2",
        }
    }
}

impl TryFrom<String> for SchemaVersion {
    type Error = DescriptorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<SchemaVersion> for String {
    fn from(version: SchemaVersion) -> Self {
        version.as_str().to_owned()
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meta {
    #[serde(rename = "schemaVersion")]
    pub schema_version: SchemaVersion,
}

/// The root manifest: a schema version tag plus one component.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComponentDescriptor {
    pub meta: Meta,
    pub component: Component,
}

impl ComponentDescriptor {
    /// Build a typed descriptor from a parsed YAML/JSON tree.
    ///
    /// The declared `meta.schemaVersion` is checked up front so an
    /// unsupported version surfaces as
    /// [`DescriptorError::UnrecognizedSchemaVersion`] rather than a generic
    /// shape mismatch. Access fields decode through the process-wide
    /// [`crate::registry`]; unknown access kinds are retained, never
    /// rejected.
    pub fn from_value(raw: &Value) -> Result<Self, DescriptorError> {
        let declared = raw
            .pointer("/meta/schemaVersion")
            .ok_or_else(|| DescriptorError::Malformed("missing meta.schemaVersion".to_owned()))?;
        let declared = declared.as_str().ok_or_else(|| {
            DescriptorError::Malformed("meta.schemaVersion must be a string".to_owned())
        })?;
        SchemaVersion::parse(declared)?;

        Self::deserialize(raw).map_err(|e| DescriptorError::Malformed(e.to_string()))
    }

    /// Wire representation of the descriptor; the inverse of
    /// [`Self::from_value`].
    pub fn to_value(&self) -> Result<Value, DescriptorError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn schema_version(&self) -> SchemaVersion {
        self.meta.schema_version
    }
}

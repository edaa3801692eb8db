use crate::document::schema_document;
use cartouche_model::SchemaVersion;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing meta.schemaVersion")]
    MissingSchemaVersion,
    #[error("unsupported schema version: {0}")]
    UnsupportedSchemaVersion(String),
    /// The schema engine reported non-conformance; carries the engine's
    /// diagnostic path and message.
    #[error("descriptor violates schema at '{path}': {message}")]
    Schema { path: String, message: String },
    #[error("invalid schema document: {0}")]
    InvalidSchemaDocument(String),
}

/// How schema violations are reported.
///
/// Threaded explicitly into every validation call; there is no global
/// strictness state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Violations abort with [`ValidationError::Schema`].
    Fail,
    /// Violations are logged through `tracing` and processing continues.
    Warn,
    /// Validation is skipped.
    #[default]
    None,
}

/// Compiled schema validator for one descriptor document.
pub struct Validator {
    compiled: jsonschema::Validator,
}

impl Validator {
    /// Validator backed by the built-in document for `version`.
    pub fn for_version(version: SchemaVersion) -> Result<Self, ValidationError> {
        let document: Value = serde_json::from_str(schema_document(version))
            .map_err(|e| ValidationError::InvalidSchemaDocument(e.to_string()))?;
        Self::from_document(&document)
    }

    /// Validator backed by a caller-supplied schema document.
    pub fn from_document(document: &Value) -> Result<Self, ValidationError> {
        let compiled = jsonschema::validator_for(document)
            .map_err(|e| ValidationError::InvalidSchemaDocument(e.to_string()))?;
        Ok(Self { compiled })
    }

    /// Check `raw` against the schema, reporting violations per `mode`.
    pub fn validate(&self, raw: &Value, mode: ValidationMode) -> Result<(), ValidationError> {
        match mode {
            ValidationMode::None => Ok(()),
            ValidationMode::Fail => match self.compiled.iter_errors(raw).next() {
                Some(violation) => Err(ValidationError::Schema {
                    path: violation.instance_path.to_string(),
                    message: violation.to_string(),
                }),
                None => Ok(()),
            },
            ValidationMode::Warn => {
                for violation in self.compiled.iter_errors(raw) {
                    warn!(
                        "component descriptor violates schema at '{}': {violation}",
                        violation.instance_path
                    );
                }
                Ok(())
            }
        }
    }
}

/// Validate a raw descriptor tree against the built-in schema for its
/// declared `meta.schemaVersion`.
///
/// A missing or unrecognized schema version is an error in every mode: it is
/// a structural precondition, not a content-validation concern.
pub fn validate(raw: &Value, mode: ValidationMode) -> Result<(), ValidationError> {
    let version = declared_schema_version(raw)?;
    if mode == ValidationMode::None {
        return Ok(());
    }
    Validator::for_version(version)?.validate(raw, mode)
}

fn declared_schema_version(raw: &Value) -> Result<SchemaVersion, ValidationError> {
    let declared = raw
        .pointer("/meta/schemaVersion")
        .and_then(Value::as_str)
        .ok_or(ValidationError::MissingSchemaVersion)?;
    SchemaVersion::parse(declared)
        .map_err(|_| ValidationError::UnsupportedSchemaVersion(declared.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn broken_descriptor() -> Value {
        // component.version has the wrong shape
        json!({
            "meta": {"schemaVersion": "v2"},
            "component": {"name": "acme.org/widget", "version": 42},
        })
    }

    #[test]
    fn fail_mode_surfaces_engine_diagnostics() {
        let err = validate(&broken_descriptor(), ValidationMode::Fail).unwrap_err();
        let ValidationError::Schema { path, .. } = err else {
            panic!("expected a schema violation");
        };
        assert!(path.contains("version"), "unexpected path: {path}");
    }

    #[test]
    fn warn_mode_reports_and_continues() {
        assert!(validate(&broken_descriptor(), ValidationMode::Warn).is_ok());
    }

    #[test]
    fn none_mode_skips_validation_entirely() {
        assert!(validate(&broken_descriptor(), ValidationMode::None).is_ok());
    }

    #[test]
    fn unsupported_schema_version_fails_in_every_mode() {
        let raw = json!({"meta": {"schemaVersion": "v9"}, "component": {}});
        for mode in [ValidationMode::Fail, ValidationMode::Warn, ValidationMode::None] {
            assert!(matches!(
                validate(&raw, mode),
                Err(ValidationError::UnsupportedSchemaVersion(ref v)) if v == "v9"
            ));
        }
    }

    #[test]
    fn missing_schema_version_fails_in_every_mode() {
        let raw = json!({"component": {}});
        for mode in [ValidationMode::Fail, ValidationMode::Warn, ValidationMode::None] {
            assert!(matches!(
                validate(&raw, mode),
                Err(ValidationError::MissingSchemaVersion)
            ));
        }
    }

    #[test]
    fn validation_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_value(ValidationMode::Fail).unwrap(), json!("fail"));
        let mode: ValidationMode = serde_json::from_value(json!("none")).unwrap();
        assert_eq!(mode, ValidationMode::None);
    }
}

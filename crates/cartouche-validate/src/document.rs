//! Built-in JSON-schema documents, keyed by descriptor schema version.
//!
//! The documents are structural: required fields, version-string patterns,
//! and enum membership. Access mappings stay open so unknown kinds pass
//! validation the same way they pass decoding.

use cartouche_model::SchemaVersion;

/// JSON-schema document for `v2` component descriptors (draft-07).
pub const V2_SCHEMA: &str = r##"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "$id": "https://cartouche.dev/schemas/component-descriptor-v2",
  "title": "Component descriptor v2",
  "type": "object",
  "required": ["meta", "component"],
  "definitions": {
    "versionString": {
      "type": "string",
      "pattern": "^v?(0|[1-9]\\d*)(\\.(0|[1-9]\\d*))?(\\.(0|[1-9]\\d*))?(-((0|[1-9]\\d*|\\d*[a-zA-Z-][0-9a-zA-Z-]*)(\\.(0|[1-9]\\d*|\\d*[a-zA-Z-][0-9a-zA-Z-]*))*))?(\\+([0-9a-zA-Z-]+(\\.[0-9a-zA-Z-]+)*))?$"
    },
    "label": {
      "type": "object",
      "required": ["name", "value"],
      "properties": {
        "name": { "type": "string" }
      }
    },
    "labels": {
      "type": "array",
      "items": { "$ref": "#/definitions/label" }
    },
    "extraIdentity": {
      "type": "object",
      "additionalProperties": { "type": "string" }
    },
    "access": {
      "type": ["object", "null"]
    },
    "repositoryContext": {
      "type": "object",
      "required": ["baseUrl", "type"],
      "properties": {
        "baseUrl": { "type": "string" },
        "type": { "enum": ["ociRegistry"] }
      }
    },
    "sourceReference": {
      "type": "object",
      "properties": {
        "identitySelector": { "$ref": "#/definitions/extraIdentity" },
        "labels": { "$ref": "#/definitions/labels" }
      }
    },
    "resource": {
      "type": "object",
      "required": ["name", "version", "type"],
      "properties": {
        "name": { "type": "string", "minLength": 1 },
        "version": { "$ref": "#/definitions/versionString" },
        "type": { "type": "string" },
        "extraIdentity": { "$ref": "#/definitions/extraIdentity" },
        "labels": { "$ref": "#/definitions/labels" },
        "access": { "$ref": "#/definitions/access" },
        "relation": { "enum": ["local", "external"] },
        "srcRefs": {
          "type": "array",
          "items": { "$ref": "#/definitions/sourceReference" }
        }
      }
    },
    "source": {
      "type": "object",
      "required": ["name", "version", "type"],
      "properties": {
        "name": { "type": "string", "minLength": 1 },
        "version": { "$ref": "#/definitions/versionString" },
        "type": { "type": "string" },
        "extraIdentity": { "$ref": "#/definitions/extraIdentity" },
        "labels": { "$ref": "#/definitions/labels" },
        "access": { "$ref": "#/definitions/access" }
      }
    },
    "componentReference": {
      "type": "object",
      "required": ["name", "version"],
      "properties": {
        "name": { "type": "string", "minLength": 1 },
        "componentName": { "type": "string" },
        "version": { "$ref": "#/definitions/versionString" },
        "extraIdentity": { "$ref": "#/definitions/extraIdentity" },
        "labels": { "$ref": "#/definitions/labels" }
      }
    },
    "component": {
      "type": "object",
      "required": ["name", "version"],
      "properties": {
        "name": { "type": "string", "minLength": 1 },
        "version": { "$ref": "#/definitions/versionString" },
        "provider": { "type": ["string", "null"] },
        "repositoryContexts": {
          "type": "array",
          "items": { "$ref": "#/definitions/repositoryContext" }
        },
        "sources": {
          "type": "array",
          "items": { "$ref": "#/definitions/source" }
        },
        "componentReferences": {
          "type": "array",
          "items": { "$ref": "#/definitions/componentReference" }
        },
        "resources": {
          "type": "array",
          "items": { "$ref": "#/definitions/resource" }
        },
        "labels": { "$ref": "#/definitions/labels" }
      }
    }
  },
  "properties": {
    "meta": {
      "type": "object",
      "required": ["schemaVersion"],
      "properties": {
        "schemaVersion": { "enum": ["v2"] }
      }
    },
    "component": { "$ref": "#/definitions/component" }
  }
}"##;

/// The built-in schema document for the given descriptor version.
pub fn schema_document(version: SchemaVersion) -> &'static str {
    match version {
        SchemaVersion::V2 => V2_SCHEMA,
    }
}

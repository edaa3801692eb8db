//! Schema validation for component descriptors.
//!
//! This crate holds the versioned JSON-schema documents (`document`), the
//! permissive semantic-version grammar they embed (`version`), and the
//! configurable-strictness validation entry points (`validate`): a raw
//! descriptor tree is checked structurally before or after it is turned
//! into the typed model from `cartouche-model`, with violations raised,
//! logged, or skipped depending on the [`ValidationMode`].

pub mod document;
pub mod validate;
pub mod version;

pub use document::{schema_document, V2_SCHEMA};
pub use validate::{validate, ValidationError, ValidationMode, Validator};
pub use version::{is_relaxed_semver, RELAXED_SEMVER_PATTERN};

//! Typed component descriptor model for Cartouche.
//!
//! This crate defines the in-memory object model for versioned component
//! manifests: the root `ComponentDescriptor`, its `Component` with resources,
//! sources, component references, and repository contexts, the ordered
//! name-unique label collection, and polymorphic `access` decoding driven by
//! an extensible discriminator registry. Entities are immutable value
//! objects; every mutation helper returns a patched clone.
//!
//! Input and output is a `serde_json::Value` tree, i.e. the result of
//! parsing a YAML or JSON document. Parsing itself, file and registry I/O,
//! and schema validation (see `cartouche-validate`) live elsewhere.

pub mod access;
pub mod component;
pub mod descriptor;
pub mod label;
pub mod registry;

pub use access::{
    access_type, Access, AccessError, GithubAccess, LocalFilesystemBlobAccess, OciAccess,
    RelativeOciAccess,
};
pub use component::{
    Component, ComponentReference, NavigationError, RepositoryContext, Resource, ResourceRelation,
    ResourceType, Source, SourceReference, SourceType,
};
pub use descriptor::{ComponentDescriptor, DescriptorError, Meta, SchemaVersion};
pub use label::{Label, LabelError, Labeled, Labels};
pub use registry::{AccessDecoder, AccessRegistry};

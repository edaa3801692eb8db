use crate::access::Access;
use crate::label::{Labeled, Labels};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("component has no repository context")]
    EmptyRepositoryContexts,
    #[error("malformed repository URL '{0}': expected host/org/repo")]
    MalformedRepoUrl(String),
}

/// Open string enum: known kinds get a variant, everything else is kept
/// verbatim in `Other` so descriptors using newer kinds round-trip.
macro_rules! open_string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Other(other) => other,
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                match s.as_str() {
                    $($wire => Self::$variant,)+
                    _ => Self::Other(s),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_owned()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

open_string_enum!(
    /// Artifact kind of a resource, e.g. a container image or a generic blob.
    ResourceType {
        OciImage => "ociImage",
        Generic => "generic",
    }
);

open_string_enum!(
    /// Kind of a source reference.
    SourceType {
        Git => "git",
    }
);

/// Whether a resource was built from the component's own sources (`local`)
/// or consumed from elsewhere (`external`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceRelation {
    Local,
    External,
}

/// Location where the descriptor itself is or was stored.
///
/// A component's `repositoryContexts` is an append-only history: the last
/// entry is the current one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryContext {
    pub base_url: String,
    #[serde(rename = "type")]
    pub ctx_type: String,
}

impl RepositoryContext {
    pub const OCI_REGISTRY: &'static str = "ociRegistry";

    /// OCI-registry-backed context, the only kind currently produced.
    pub fn oci(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ctx_type: Self::OCI_REGISTRY.to_owned(),
        }
    }
}

/// Cross-reference from a resource into the component's sources, matched by
/// identity attributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SourceReference {
    #[serde(default)]
    pub identity_selector: BTreeMap<String, String>,
    #[serde(default)]
    pub labels: Labels,
}

/// An artifact produced by or shipped with the component.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[serde(default)]
    pub extra_identity: BTreeMap<String, String>,
    #[serde(default)]
    pub labels: Labels,
    /// `None` means descriptive-only: nothing to retrieve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<ResourceRelation>,
    #[serde(default)]
    pub src_refs: Vec<SourceReference>,
}

/// A reference to the source code the component was built from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub source_type: SourceType,
    #[serde(default)]
    pub extra_identity: BTreeMap<String, String>,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
}

/// A reference to another component in the same landscape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentReference {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
    pub version: String,
    #[serde(default)]
    pub extra_identity: BTreeMap<String, String>,
    #[serde(default)]
    pub labels: Labels,
}

/// One versioned software component with its artifacts and provenance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default)]
    pub repository_contexts: Vec<RepositoryContext>,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub component_references: Vec<ComponentReference>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub labels: Labels,
}

impl Component {
    /// The repository context the descriptor currently lives in.
    pub fn current_repository_ctx(&self) -> Result<&RepositoryContext, NavigationError> {
        self.repository_contexts
            .last()
            .ok_or(NavigationError::EmptyRepositoryContexts)
    }
}

/// `name` + `version` + `extraIdentity`, the attributes that disambiguate
/// same-named entries within a collection.
fn identity(
    name: &str,
    version: &str,
    extra: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut attributes = extra.clone();
    attributes.insert("name".to_owned(), name.to_owned());
    attributes.insert("version".to_owned(), version.to_owned());
    attributes
}

impl Resource {
    pub fn identity(&self) -> BTreeMap<String, String> {
        identity(&self.name, &self.version, &self.extra_identity)
    }

    /// The retrievable access, treating the explicit `{"type": "None"}`
    /// marker and an absent field alike.
    pub fn effective_access(&self) -> Option<&Access> {
        effective(self.access.as_ref())
    }
}

impl Source {
    pub fn identity(&self) -> BTreeMap<String, String> {
        identity(&self.name, &self.version, &self.extra_identity)
    }

    /// The retrievable access, treating the explicit `{"type": "None"}`
    /// marker and an absent field alike.
    pub fn effective_access(&self) -> Option<&Access> {
        effective(self.access.as_ref())
    }
}

fn effective(access: Option<&Access>) -> Option<&Access> {
    access.filter(|access| !access.is_none())
}

impl ComponentReference {
    pub fn identity(&self) -> BTreeMap<String, String> {
        identity(&self.name, &self.version, &self.extra_identity)
    }
}

macro_rules! impl_labeled {
    ($($entity:ty),+ $(,)?) => {
        $(
            impl Labeled for $entity {
                fn labels(&self) -> &Labels {
                    &self.labels
                }

                fn with_labels(&self, labels: Labels) -> Self {
                    Self {
                        labels,
                        ..self.clone()
                    }
                }
            }
        )+
    };
}

impl_labeled!(Resource, Source, ComponentReference, Component);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Label;

    fn component_with_contexts(contexts: Vec<RepositoryContext>) -> Component {
        Component {
            name: "acme.org/tools/widget".to_owned(),
            version: "1.2.3".to_owned(),
            provider: None,
            repository_contexts: contexts,
            sources: Vec::new(),
            component_references: Vec::new(),
            resources: Vec::new(),
            labels: Labels::new(),
        }
    }

    #[test]
    fn current_repository_ctx_is_last_entry() {
        let component = component_with_contexts(vec![
            RepositoryContext::oci("old-ctx-url"),
            RepositoryContext::oci("current-ctx-url"),
        ]);
        assert_eq!(
            component.current_repository_ctx().unwrap().base_url,
            "current-ctx-url"
        );
    }

    #[test]
    fn current_repository_ctx_fails_on_empty_history() {
        let component = component_with_contexts(Vec::new());
        assert!(matches!(
            component.current_repository_ctx(),
            Err(NavigationError::EmptyRepositoryContexts)
        ));
    }

    #[test]
    fn resource_type_keeps_unknown_kinds() {
        let known = ResourceType::from("ociImage".to_owned());
        assert_eq!(known, ResourceType::OciImage);
        let unknown = ResourceType::from("helmChart".to_owned());
        assert_eq!(unknown.as_str(), "helmChart");
        assert_eq!(String::from(unknown), "helmChart");
    }

    #[test]
    fn identity_merges_extra_identity_with_name_and_version() {
        let resource = Resource {
            name: "img".to_owned(),
            version: "1.0.0".to_owned(),
            resource_type: ResourceType::OciImage,
            extra_identity: BTreeMap::from([("arch".to_owned(), "arm64".to_owned())]),
            labels: Labels::new(),
            access: None,
            relation: Some(ResourceRelation::Local),
            src_refs: Vec::new(),
        };
        let identity = resource.identity();
        assert_eq!(identity.get("name").map(String::as_str), Some("img"));
        assert_eq!(identity.get("version").map(String::as_str), Some("1.0.0"));
        assert_eq!(identity.get("arch").map(String::as_str), Some("arm64"));
    }

    #[test]
    fn set_label_returns_patched_clone() {
        let component = component_with_contexts(Vec::new());
        let patched = component
            .set_label(Label::new("acme.org/owner", "team-a"), true)
            .unwrap();
        assert!(patched.has_label("acme.org/owner"));
        assert!(!component.has_label("acme.org/owner"));
        assert_eq!(patched.name, component.name);
    }
}

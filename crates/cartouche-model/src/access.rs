use crate::component::NavigationError;
use crate::registry;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Discriminator strings for the built-in access kinds.
pub mod access_type {
    pub const OCI_REGISTRY: &str = "ociRegistry";
    pub const RELATIVE_OCI_REFERENCE: &str = "relativeOciReference";
    pub const GITHUB: &str = "github";
    pub const LOCAL_FILESYSTEM_BLOB: &str = "localFilesystemBlob";
    pub const NONE: &str = "None";
}

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("access must be a mapping or null, got {0}")]
    NotAMapping(&'static str),
    #[error("access mapping carries no string 'type' discriminator")]
    MissingType,
    #[error("malformed '{kind}' access: {reason}")]
    MalformedVariant { kind: String, reason: String },
}

/// Reference to an image in an OCI registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OciAccess {
    pub image_reference: String,
    /// Extension fields, retained verbatim for round-tripping.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// OCI reference resolved against the component's current repository context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RelativeOciAccess {
    pub image_reference: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reference to a git ref in a GitHub repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GithubAccess {
    pub repo_url: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GithubAccess {
    pub fn hostname(&self) -> Result<&str, NavigationError> {
        Ok(self.repo_parts()?.0)
    }

    pub fn org_name(&self) -> Result<&str, NavigationError> {
        Ok(self.repo_parts()?.1)
    }

    /// Repository name with a trailing `.git` suffix stripped.
    pub fn repository_name(&self) -> Result<&str, NavigationError> {
        Ok(self.repo_parts()?.2)
    }

    /// Split `[scheme://]host/org/.../repo[.git]` into host, org, and repo.
    fn repo_parts(&self) -> Result<(&str, &str, &str), NavigationError> {
        let trimmed = match self.repo_url.split_once("://") {
            Some((_scheme, rest)) => rest,
            None => self.repo_url.as_str(),
        };
        let parts: Vec<&str> = trimmed.split('/').filter(|part| !part.is_empty()).collect();
        if parts.len() < 3 {
            return Err(NavigationError::MalformedRepoUrl(self.repo_url.clone()));
        }
        let repo = parts[parts.len() - 1];
        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        Ok((parts[0], parts[1], repo))
    }
}

/// Reference to a blob stored alongside the descriptor on a local filesystem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LocalFilesystemBlobAccess {
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Polymorphic pointer to where an artifact or source can be retrieved.
///
/// Dispatch happens solely on the wire-level `type` discriminator. Kinds not
/// known to this library decode to [`Access::Unknown`], which retains the
/// original mapping verbatim; descriptors from newer toolchains therefore
/// load without loss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Oci(OciAccess),
    RelativeOci(RelativeOciAccess),
    Github(GithubAccess),
    LocalFilesystemBlob(LocalFilesystemBlobAccess),
    /// Explicit `{"type": "None"}` marker: no retrievable access.
    None,
    /// Unrecognized kind, discriminator included.
    Unknown(Map<String, Value>),
}

impl Access {
    /// Discriminator string for this variant.
    pub fn access_type(&self) -> &str {
        match self {
            Self::Oci(_) => access_type::OCI_REGISTRY,
            Self::RelativeOci(_) => access_type::RELATIVE_OCI_REFERENCE,
            Self::Github(_) => access_type::GITHUB,
            Self::LocalFilesystemBlob(_) => access_type::LOCAL_FILESYSTEM_BLOB,
            Self::None => access_type::NONE,
            Self::Unknown(fields) => fields
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or_default(),
        }
    }

    /// Whether this is the explicit no-access marker.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Wire representation, discriminator included.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::Oci(access) => tagged(access_type::OCI_REGISTRY, access),
            Self::RelativeOci(access) => tagged(access_type::RELATIVE_OCI_REFERENCE, access),
            Self::Github(access) => tagged(access_type::GITHUB, access),
            Self::LocalFilesystemBlob(access) => tagged(access_type::LOCAL_FILESYSTEM_BLOB, access),
            Self::None => Ok(Value::Object(
                std::iter::once(("type".to_owned(), Value::String(access_type::NONE.to_owned())))
                    .collect(),
            )),
            Self::Unknown(fields) => Ok(Value::Object(fields.clone())),
        }
    }
}

fn tagged<T: Serialize>(kind: &str, payload: &T) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(payload)?;
    if let Value::Object(fields) = &mut value {
        fields.insert("type".to_owned(), Value::String(kind.to_owned()));
    }
    Ok(value)
}

impl Serialize for Access {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Access {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        registry::decode(Some(&raw)).map_err(serde::de::Error::custom)
    }
}

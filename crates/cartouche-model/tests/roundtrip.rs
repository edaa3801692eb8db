//! End-to-end deserialization and round-trip tests against a full v2
//! descriptor, including custom resource kinds and an unknown access kind.

use cartouche_model::{
    Access, ComponentDescriptor, Label, Labeled, ResourceType, SourceType,
};
use serde_json::{json, Value};

const CUSTOM_DESCRIPTOR: &str = r"
meta:
  schemaVersion: 'v2'
component:
  name: 'acme.org/tools/widget'
  version: '1.2.3'
  provider: 'internal'
  repositoryContexts:
    - baseUrl: 'eu.gcr.io/acme/context'
      type: 'ociRegistry'
  sources:
    - name: 'widget-sources'
      version: '1.2.3'
      type: 'git'
      extraIdentity: {}
      labels: []
      access:
        type: 'github'
        repoUrl: 'github.com/acme/widget'
        ref: 'refs/tags/1.2.3'
        commit: '0c47e3d1'
  componentReferences:
    - name: 'base-image'
      componentName: 'acme.org/base/image'
      version: '0.9.0'
      extraIdentity: {}
      labels: []
  resources:
    - name: 'installer'
      version: '1.2.3'
      type: 'generic'
      relation: 'local'
      extraIdentity: {}
      labels: []
      srcRefs: []
      access:
        type: 'localFilesystemBlob'
        filename: 'installer.tgz'
        mediaType: 'application/gzip'
    - name: 'docs'
      version: '1.2.3'
      type: 'generic'
      relation: 'local'
      extraIdentity: {}
      labels: []
      srcRefs: []
    - name: 'telemetry'
      version: '1.2.3'
      type: 'custom/telemetry-bundle'
      relation: 'external'
      extraIdentity: {}
      labels: []
      srcRefs: []
      access:
        type: 'acme/objectStore'
        bucket: 'acme-artifacts'
        key: 'telemetry/1.2.3'
    - name: 'widget-image'
      version: '1.2.3'
      type: 'ociImage'
      relation: 'local'
      extraIdentity:
        platform: 'linux-amd64'
      labels:
        - name: 'acme.org/scan-policy'
          value:
            onFinding: 'block'
      srcRefs:
        - identitySelector:
            name: 'widget-sources'
          labels: []
      access:
        type: 'relativeOciReference'
        imageReference: 'widget:1.2.3'
    - name: 'licenses'
      version: '1.2.3'
      type: 'generic'
      relation: 'local'
      extraIdentity: {}
      labels: []
      srcRefs: []
      access:
        type: 'None'
  labels:
    - name: 'acme.org/team'
      value: 'runtime'
";

fn load_raw() -> Value {
    serde_yaml::from_str(CUSTOM_DESCRIPTOR).expect("fixture parses")
}

#[test]
fn deserializes_typed_access_variants() {
    let descriptor = ComponentDescriptor::from_value(&load_raw()).unwrap();
    let resources = &descriptor.component.resources;

    assert!(matches!(
        resources[0].access,
        Some(Access::LocalFilesystemBlob(ref blob))
            if blob.filename == "installer.tgz"
            && blob.media_type.as_deref() == Some("application/gzip")
    ));
    assert!(resources[1].access.is_none());
    assert!(matches!(resources[2].access, Some(Access::Unknown(_))));
    assert!(matches!(
        resources[3].access,
        Some(Access::RelativeOci(ref oci)) if oci.image_reference == "widget:1.2.3"
    ));

    assert_eq!(resources[3].resource_type, ResourceType::OciImage);
    assert_eq!(
        resources[2].resource_type,
        ResourceType::Other("custom/telemetry-bundle".to_owned())
    );
}

#[test]
fn explicit_none_marker_and_absent_access_both_mean_no_access() {
    let descriptor = ComponentDescriptor::from_value(&load_raw()).unwrap();
    let resources = &descriptor.component.resources;

    // 'docs' omits the field, 'licenses' carries the explicit marker.
    assert!(resources[1].access.is_none());
    assert_eq!(resources[4].access, Some(Access::None));
    assert!(resources[1].effective_access().is_none());
    assert!(resources[4].effective_access().is_none());
}

#[test]
fn unknown_access_kind_retains_all_fields() {
    let descriptor = ComponentDescriptor::from_value(&load_raw()).unwrap();
    let Some(Access::Unknown(ref fields)) = descriptor.component.resources[2].access else {
        panic!("expected pass-through access");
    };
    assert_eq!(fields.get("type"), Some(&json!("acme/objectStore")));
    assert_eq!(fields.get("bucket"), Some(&json!("acme-artifacts")));
    assert_eq!(fields.get("key"), Some(&json!("telemetry/1.2.3")));
}

#[test]
fn github_source_access_navigates_repo_url() {
    let descriptor = ComponentDescriptor::from_value(&load_raw()).unwrap();
    let source = &descriptor.component.sources[0];
    assert_eq!(source.source_type, SourceType::Git);

    let Some(Access::Github(ref github)) = source.access else {
        panic!("expected a github access");
    };
    assert_eq!(github.hostname().unwrap(), "github.com");
    assert_eq!(github.org_name().unwrap(), "acme");
    assert_eq!(github.repository_name().unwrap(), "widget");
    assert_eq!(github.git_ref, "refs/tags/1.2.3");
    // Extension fields on a known variant survive decoding.
    assert_eq!(github.extra.get("commit"), Some(&json!("0c47e3d1")));
}

#[test]
fn serialization_is_the_exact_inverse_of_deserialization() {
    let raw = load_raw();
    let descriptor = ComponentDescriptor::from_value(&raw).unwrap();
    assert_eq!(descriptor.to_value().unwrap(), raw);
}

#[test]
fn current_repository_ctx_resolves_from_fixture() {
    let descriptor = ComponentDescriptor::from_value(&load_raw()).unwrap();
    let ctx = descriptor.component.current_repository_ctx().unwrap();
    assert_eq!(ctx.base_url, "eu.gcr.io/acme/context");
    assert_eq!(ctx.ctx_type, "ociRegistry");
}

#[test]
fn set_label_leaves_the_deserialized_tree_untouched() {
    let raw = load_raw();
    let descriptor = ComponentDescriptor::from_value(&raw).unwrap();

    let patched = descriptor.component.resources[3]
        .set_label(Label::new("acme.org/scan-policy", json!({"onFinding": "warn"})), false)
        .unwrap();
    assert_eq!(
        patched.labels().get("acme.org/scan-policy").unwrap().value,
        json!({"onFinding": "warn"})
    );

    // The descriptor still serializes to the original tree.
    assert_eq!(descriptor.to_value().unwrap(), raw);
}

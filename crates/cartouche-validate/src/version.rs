//! The permissive semantic-version grammar used for component, resource,
//! and source versions.

use regex::Regex;
use std::sync::OnceLock;

/// Optional leading `v`, `MAJOR[.MINOR[.PATCH]]`, optional `-prerelease`,
/// optional `+buildmetadata`. Numeric identifiers must not carry leading
/// zeroes. The embedded schema documents match version fields against the
/// same pattern.
pub const RELAXED_SEMVER_PATTERN: &str = concat!(
    r"^v?(0|[1-9]\d*)",
    r"(\.(0|[1-9]\d*))?",
    r"(\.(0|[1-9]\d*))?",
    r"(-((0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*)(\.(0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*))*))?",
    r"(\+([0-9a-zA-Z-]+(\.[0-9a-zA-Z-]+)*))?$",
);

static PATTERN: OnceLock<Regex> = OnceLock::new();

/// Whether `version` matches the permissive semver grammar.
pub fn is_relaxed_semver(version: &str) -> bool {
    let pattern = PATTERN
        .get_or_init(|| Regex::new(RELAXED_SEMVER_PATTERN).expect("version pattern is valid"));
    pattern.is_match(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_relaxed_semver_forms() {
        for version in [
            "1.2.3",
            "2.4",
            "2",
            "v2",
            "v2-foo",
            "1.2.3-foo",
            "1.2.3+foo",
            "v1.2.3+foo",
            "v3.6.9-foo+bar",
            "0.1.0-alpha.1",
        ] {
            assert!(is_relaxed_semver(version), "should accept {version}");
        }
    }

    #[test]
    fn rejects_malformed_versions() {
        for version in ["", "v", "x.y.z", "1.2.3.4", "01", "1.02", "1.2.3-", "-foo"] {
            assert!(!is_relaxed_semver(version), "should reject {version}");
        }
    }
}

//! Service metadata.

use serde::{Deserialize, Serialize};

/// Build and runtime metadata of the server, from `GET /version`.
///
/// Field names follow the server's camelCase wire contract rather than
/// this crate's usual snake_case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Semantic version of the running service.
    pub version: String,
    /// Short commit hash the build was cut from.
    pub commit: String,
    /// Build timestamp.
    pub built: String,
    /// Build origin, e.g. "ci".
    #[serde(rename = "builtBy")]
    pub built_by: String,
    /// Toolchain version the server was built with.
    pub go: String,
    /// Server operating system.
    #[serde(rename = "goOS")]
    pub go_os: String,
    /// Server architecture.
    #[serde(rename = "goArch")]
    pub go_arch: String,
    /// Version-control system, when build info is embedded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcs: Option<String>,
    /// Full VCS revision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    /// Commit timestamp.
    #[serde(default, rename = "commitTime", skip_serializing_if = "Option::is_none")]
    pub commit_time: Option<String>,
    /// Whether the working tree was dirty at build time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<bool>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_version_info_uses_camel_case_wire_names() {
        let json = r#"{
            "version": "1.4.2",
            "commit": "a1b2c3d",
            "built": "2025-11-08T12:34:56Z",
            "builtBy": "ci",
            "go": "go1.23.3",
            "goOS": "linux",
            "goArch": "amd64"
        }"#;
        let info: VersionInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.built_by, "ci");
        assert_eq!(info.go_os, "linux");
        assert_eq!(info.go_arch, "amd64");
        assert_eq!(info.commit_time, None);
    }
}

//! Buildpack identity
//!
//! Parsed from the `[buildpack]` table of `buildpack.toml`. The identity
//! is the only input the default properties content depends on.

use crate::error::{JvmsecError, JvmsecResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Descriptor file name inside a buildpack directory
pub const BUILDPACK_DESCRIPTOR: &str = "buildpack.toml";

/// `[buildpack]` table of `buildpack.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildpackInfo {
    pub id: String,

    pub name: String,

    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

#[derive(Deserialize)]
struct Descriptor {
    buildpack: BuildpackInfo,
}

impl BuildpackInfo {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            homepage: None,
        }
    }

    /// Load `buildpack.toml` from a buildpack directory
    pub async fn from_dir(dir: &Path) -> JvmsecResult<Self> {
        let path = dir.join(BUILDPACK_DESCRIPTOR);
        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            JvmsecError::io(format!("reading buildpack descriptor {}", path.display()), e)
        })?;
        Self::parse(&content).map_err(|e| match e {
            JvmsecError::BuildpackInvalid { reason, .. } => {
                JvmsecError::BuildpackInvalid { path, reason }
            }
            other => other,
        })
    }

    /// Parse a `buildpack.toml` document
    pub fn parse(content: &str) -> JvmsecResult<Self> {
        let descriptor: Descriptor =
            toml::from_str(content).map_err(|e| JvmsecError::BuildpackInvalid {
                path: BUILDPACK_DESCRIPTOR.into(),
                reason: e.to_string(),
            })?;
        Ok(descriptor.buildpack)
    }

    /// Display form used in generated file headers, e.g. `Paketo JVM 1.2.3`
    pub fn display_name(&self) -> String {
        if self.version.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.version)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DESCRIPTOR: &str = r#"
api = "0.10"

[buildpack]
id = "example/jvm"
name = "Example JVM Buildpack"
version = "1.4.0"
homepage = "https://example.com/jvm"

[[stacks]]
id = "*"
"#;

    #[test]
    fn parse_descriptor() {
        let info = BuildpackInfo::parse(DESCRIPTOR).unwrap();
        assert_eq!(info.id, "example/jvm");
        assert_eq!(info.name, "Example JVM Buildpack");
        assert_eq!(info.version, "1.4.0");
        assert_eq!(info.homepage.as_deref(), Some("https://example.com/jvm"));
        assert_eq!(info.display_name(), "Example JVM Buildpack 1.4.0");
    }

    #[test]
    fn missing_buildpack_table_errors() {
        let result = BuildpackInfo::parse("api = \"0.10\"\n");
        assert!(matches!(result, Err(JvmsecError::BuildpackInvalid { .. })));
    }

    #[test]
    fn display_name_without_version() {
        let info = BuildpackInfo::new("id", "test-name", "");
        assert_eq!(info.display_name(), "test-name");
    }

    #[tokio::test]
    async fn from_dir_reads_descriptor() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(BUILDPACK_DESCRIPTOR), DESCRIPTOR).unwrap();

        let info = BuildpackInfo::from_dir(temp.path()).await.unwrap();
        assert_eq!(info.id, "example/jvm");
    }

    #[tokio::test]
    async fn from_dir_reports_real_path() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(BUILDPACK_DESCRIPTOR), "[buildpack]\n").unwrap();

        match BuildpackInfo::from_dir(temp.path()).await {
            Err(JvmsecError::BuildpackInvalid { path, .. }) => {
                assert_eq!(path, temp.path().join(BUILDPACK_DESCRIPTOR));
            }
            other => panic!("expected BuildpackInvalid, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn from_dir_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = BuildpackInfo::from_dir(temp.path()).await;
        assert!(matches!(result, Err(JvmsecError::Io { .. })));
    }
}

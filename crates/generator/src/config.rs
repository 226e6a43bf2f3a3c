//! Table of contents configuration (`toc.yaml`)
//!
//! ```yaml
//! parts:
//!   - name: Workloads
//!     chapters:
//!       - name: Pod
//!         group: ""
//!         version: v1
//!       - name: Container
//!         key: io.k8s.api.core.v1.Container
//! ```

use k8s_api_reference_common::{APIGroup, APIVersion, Key, ReferenceError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the TOC file in the configuration directory
pub const TOC_FILE: &str = "toc.yaml";

/// Root of the TOC configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TocConfig {
    #[serde(default)]
    pub parts: Vec<PartConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartConfig {
    pub name: String,
    #[serde(default)]
    pub chapters: Vec<ChapterConfig>,
}

/// A configured chapter, either resource-backed (`group` and `version`) or
/// definition-backed (`key`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<APIGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<APIVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Key>,
}

/// What a configured chapter documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterTarget<'a> {
    Resource {
        group: &'a APIGroup,
        version: &'a APIVersion,
    },
    Definition(&'a Key),
}

impl ChapterConfig {
    pub fn resource(name: &str, group: &str, version: APIVersion) -> Self {
        Self {
            name: name.to_string(),
            group: Some(APIGroup::new(group)),
            version: Some(version),
            key: None,
        }
    }

    pub fn definition(name: &str, key: &str) -> Self {
        Self {
            name: name.to_string(),
            group: None,
            version: None,
            key: Some(Key::new(key)),
        }
    }

    /// What the chapter documents, group and version take precedence over key
    pub fn target(&self) -> Result<ChapterTarget<'_>> {
        match (&self.group, &self.version, &self.key) {
            (Some(group), Some(version), _) => Ok(ChapterTarget::Resource { group, version }),
            (_, _, Some(key)) => Ok(ChapterTarget::Definition(key)),
            _ => Err(ReferenceError::Config(format!(
                "chapter {:?} needs either group and version, or key",
                self.name
            ))),
        }
    }
}

impl TocConfig {
    /// Load the TOC from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ReferenceError::Config(format!("Failed to read TOC file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            ReferenceError::Yaml(e) => ReferenceError::Config(format!(
                "Failed to parse TOC YAML from {:?}: {}",
                path, e
            )),
            other => other,
        })
    }

    /// Load `toc.yaml` from a configuration directory
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        Self::load(&dir.join(TOC_FILE))
    }

    /// Parse and validate a TOC document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: TocConfig = serde_yaml::from_str(content)?;
        for chapter in config.parts.iter().flat_map(|p| &p.chapters) {
            chapter.target()?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toc() {
        let yaml = r#"
parts:
  - name: Workloads
    chapters:
      - name: Pod
        group: ""
        version: v1
      - name: Deployment
        group: apps
        version: v1
  - name: Common Definitions
    chapters:
      - name: ObjectMeta
        key: io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta
"#;
        let config = TocConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.parts.len(), 2);
        assert_eq!(
            config.parts[0].chapters[0],
            ChapterConfig::resource("Pod", "", APIVersion::parse("v1").unwrap())
        );

        let meta = &config.parts[1].chapters[0];
        assert_eq!(
            meta.target().unwrap(),
            ChapterTarget::Definition(&Key::new("io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta"))
        );
    }

    #[test]
    fn test_malformed_version_is_rejected() {
        let yaml = r#"
parts:
  - name: Workloads
    chapters:
      - name: Pod
        group: ""
        version: version1
"#;
        assert!(TocConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_chapter_without_target_is_rejected() {
        let yaml = r#"
parts:
  - name: Workloads
    chapters:
      - name: Pod
        group: ""
"#;
        assert!(matches!(
            TocConfig::from_yaml(yaml),
            Err(ReferenceError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(TOC_FILE),
            "parts:\n  - name: Workloads\n    chapters: []\n",
        )
        .unwrap();

        let config = TocConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.parts[0].name, "Workloads");

        let missing = TocConfig::load_from_dir(&dir.path().join("nope"));
        assert!(matches!(missing, Err(ReferenceError::Config(_))));
    }
}

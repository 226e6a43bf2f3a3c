//! Table of contents of the reference
//!
//! The configured parts and chapters are resolved against the specification:
//! each chapter gets its main definition as first section, followed by the
//! associated `Spec`, `Status` and `List` definitions. Every resource left
//! undocumented afterwards is gathered under an "Other Resources" part.

use crate::config::{ChapterConfig, ChapterTarget, TocConfig};
use crate::link_ends::{chapter_anchor, DocumentedDefinitions, LinkEnd, LinkEnds};
use crate::markdown::escape_name;
use k8s_api_reference_common::{gv_string, APIGroup, APIVersion, Key, ReferenceError, Result};
use k8s_api_reference_parser::{Schema, Spec};
use std::collections::BTreeSet;
use std::io::{self, Write};

/// Name of the part gathering resources not listed in the configuration
pub const OTHER_RESOURCES_PART: &str = "Other Resources";

const RESOURCE_SUFFIXES: [&str; 2] = ["Spec", "Status"];
const DEFINITION_SUFFIXES: [&str; 3] = ["Spec", "Status", "List"];
const LIST_SUFFIX: &str = "List";

/// A definition documented in a chapter
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub name: String,
    pub key: Key,
    pub definition: Schema,
}

/// A resource or definition and its associated definitions
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    pub name: String,
    pub group: Option<APIGroup>,
    pub version: Option<APIVersion>,
    /// Unique in the document, see [`chapter_anchor`]
    pub anchor: String,
    /// Key of the main definition
    pub key: Key,
    pub sections: Vec<Section>,
}

impl Chapter {
    /// `apiVersion` of the resource, `None` for plain definitions
    pub fn api_version(&self) -> Option<String> {
        match (&self.group, &self.version) {
            (Some(group), Some(version)) => Some(gv_string(group, version)),
            _ => None,
        }
    }

    /// Main definition of the chapter
    pub fn main_definition(&self) -> Option<&Schema> {
        self.sections.first().map(|s| &s.definition)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub name: String,
    pub chapters: Vec<Chapter>,
}

/// The populated table of contents
#[derive(Debug, Clone, Default)]
pub struct Toc {
    pub parts: Vec<Part>,
    pub link_ends: LinkEnds,
    pub documented: DocumentedDefinitions,
    /// Escaped anchors of the chapters created so far
    anchors: BTreeSet<String>,
}

impl Toc {
    /// Resolve every configured chapter against the specification
    ///
    /// Resolved resources are flagged as documented in `spec`. A chapter that
    /// cannot be resolved aborts the whole population.
    pub fn populate(config: &TocConfig, spec: &mut Spec) -> Result<Self> {
        let mut toc = Toc::default();

        for part_config in &config.parts {
            let mut part = Part {
                name: part_config.name.clone(),
                chapters: Vec::with_capacity(part_config.chapters.len()),
            };
            for chapter_config in &part_config.chapters {
                let chapter = toc.populate_chapter(&part.name, chapter_config, spec)?;
                part.chapters.push(chapter);
            }
            toc.parts.push(part);
        }

        tracing::debug!(
            parts = toc.parts.len(),
            link_ends = toc.link_ends.len(),
            "populated table of contents"
        );
        Ok(toc)
    }

    /// Add a part with a chapter for each resource neither replaced nor documented
    ///
    /// Chapters are sorted by Kind. A resource documented while populating an
    /// earlier chapter of the part (e.g. `FooList` in the `Foo` chapter) does
    /// not get its own chapter. The part is omitted when empty.
    pub fn add_other_resources(&mut self, spec: &mut Spec) -> Result<()> {
        let mut candidates: Vec<(String, APIGroup, APIVersion, Key)> = spec
            .undocumented_resources()
            .into_iter()
            .map(|r| (r.kind.clone(), r.group.clone(), r.version, r.key.clone()))
            .collect();
        candidates.sort_by(|a, b| a.0.cmp(&b.0));

        let mut part = Part {
            name: OTHER_RESOURCES_PART.to_string(),
            chapters: Vec::new(),
        };
        for (kind, group, version, key) in candidates {
            if spec.resources().any(|r| r.key == key && r.documented) {
                tracing::trace!(%key, "already documented in another chapter");
                continue;
            }
            let config = ChapterConfig {
                name: kind,
                group: Some(group),
                version: Some(version),
                key: None,
            };
            let chapter = self.populate_chapter(OTHER_RESOURCES_PART, &config, spec)?;
            part.chapters.push(chapter);
        }

        if !part.chapters.is_empty() {
            tracing::debug!(chapters = part.chapters.len(), "added other resources");
            self.parts.push(part);
        }
        Ok(())
    }

    fn populate_chapter(
        &mut self,
        part: &str,
        config: &ChapterConfig,
        spec: &mut Spec,
    ) -> Result<Chapter> {
        let target = config.target()?;

        let (key, main) = match target {
            ChapterTarget::Resource { group, version } => spec
                .get_resource(group, version, &config.name, true)
                .map(|(key, schema)| (key, schema.clone()))
                .ok_or_else(|| {
                    ReferenceError::ResourceNotFound(format!(
                        "{}/{}",
                        gv_string(group, version),
                        config.name
                    ))
                })?,
            ChapterTarget::Definition(key) => spec
                .get_definition(key)
                .map(|schema| (key.clone(), schema.clone()))
                .ok_or_else(|| ReferenceError::ResourceNotFound(key.to_string()))?,
        };

        let anchor = self.unique_anchor(
            &config.name,
            config.group.as_ref(),
            config.version.as_ref(),
        );
        let mut chapter = Chapter {
            name: config.name.clone(),
            group: config.group.clone(),
            version: config.version,
            anchor: anchor.clone(),
            key: key.clone(),
            sections: Vec::new(),
        };
        self.add_section(part, &anchor, &mut chapter, &config.name, key, main);

        match target {
            ChapterTarget::Resource { group, version } => {
                let prefixes = spec
                    .gv_to_key()
                    .prefixes(&gv_string(group, version))
                    .to_vec();
                for suffix in RESOURCE_SUFFIXES {
                    let name = format!("{}{}", config.name, suffix);
                    for prefix in &prefixes {
                        let key = Key::new(format!("{}.{}", prefix, name));
                        if let Some(definition) = spec.get_definition(&key) {
                            let definition = definition.clone();
                            self.add_section(part, &anchor, &mut chapter, &name, key, definition);
                        }
                    }
                }

                let name = format!("{}{}", config.name, LIST_SUFFIX);
                if let Some((key, definition)) =
                    spec.get_indexed_resource(group, version, &name, true)
                {
                    let definition = definition.clone();
                    self.add_section(part, &anchor, &mut chapter, &name, key, definition);
                }
            }
            ChapterTarget::Definition(key) => {
                for suffix in DEFINITION_SUFFIXES {
                    let name = format!("{}{}", config.name, suffix);
                    let key = Key::new(format!("{}{}", key, suffix));
                    if let Some(definition) = spec.get_definition(&key) {
                        let definition = definition.clone();
                        self.add_section(part, &anchor, &mut chapter, &name, key, definition);
                    }
                }
            }
        }

        tracing::trace!(
            chapter = %chapter.name,
            sections = chapter.sections.len(),
            "populated chapter"
        );
        Ok(chapter)
    }

    /// Anchor of a new chapter
    ///
    /// `Name-version` when free. Otherwise the group is added for non-core
    /// resources (`Widget-b.example.com-v1`), then a counter until the escaped
    /// anchor is unused.
    fn unique_anchor(
        &mut self,
        name: &str,
        group: Option<&APIGroup>,
        version: Option<&APIVersion>,
    ) -> String {
        let mut anchor = chapter_anchor(name, version);
        if self.anchors.contains(&escape_name(&anchor)) {
            if let (Some(group), Some(version)) = (group, version) {
                if !group.is_core() {
                    anchor = format!("{}-{}-{}", name, group, version);
                }
            }
        }

        let base = anchor.clone();
        let mut counter = 2;
        while self.anchors.contains(&escape_name(&anchor)) {
            anchor = format!("{}-{}", base, counter);
            counter += 1;
        }

        tracing::trace!(%anchor, "chapter anchor");
        self.anchors.insert(escape_name(&anchor));
        anchor
    }

    fn add_section(
        &mut self,
        part: &str,
        anchor: &str,
        chapter: &mut Chapter,
        name: &str,
        key: Key,
        definition: Schema,
    ) {
        self.link_ends
            .add(key.clone(), LinkEnd::new(part, anchor, name));
        self.documented.set(key.clone(), name);
        chapter.sections.push(Section {
            name: name.to_string(),
            key,
            definition,
        });
    }

    /// Write the table of contents as markdown headings
    pub fn to_markdown<W: Write>(&self, w: &mut W) -> io::Result<()> {
        for part in &self.parts {
            writeln!(w, "\n## {}", part.name)?;
            for chapter in &part.chapters {
                writeln!(w, "### {}", chapter.name)?;
                for section in &chapter.sections {
                    writeln!(w, "#### {}", section.name)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_api_version() {
        let chapter = Chapter {
            name: "Deployment".to_string(),
            group: Some(APIGroup::new("apps")),
            version: Some(APIVersion::parse("v1").unwrap()),
            anchor: "Deployment-v1".to_string(),
            key: Key::new("io.k8s.api.apps.v1.Deployment"),
            sections: Vec::new(),
        };
        assert_eq!(chapter.api_version().as_deref(), Some("apps/v1"));
        assert!(chapter.main_definition().is_none());

        let chapter = Chapter {
            name: "ObjectMeta".to_string(),
            group: None,
            version: None,
            anchor: "ObjectMeta".to_string(),
            key: Key::new("io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta"),
            sections: Vec::new(),
        };
        assert_eq!(chapter.api_version(), None);
    }

    #[test]
    fn test_unique_anchor() {
        let v1 = APIVersion::parse("v1").unwrap();
        let mut toc = Toc::default();

        assert_eq!(
            toc.unique_anchor("Widget", Some(&APIGroup::new("a.example.com")), Some(&v1)),
            "Widget-v1"
        );
        assert_eq!(
            toc.unique_anchor("Widget", Some(&APIGroup::new("b.example.com")), Some(&v1)),
            "Widget-b.example.com-v1"
        );
        assert_eq!(
            toc.unique_anchor("Widget", Some(&APIGroup::new("b.example.com")), Some(&v1)),
            "Widget-b.example.com-v1-2"
        );
        assert_eq!(
            toc.unique_anchor("Widget", Some(&APIGroup::core()), Some(&v1)),
            "Widget-v1-2"
        );
        assert_eq!(toc.unique_anchor("ObjectMeta", None, None), "ObjectMeta");
        assert_eq!(toc.unique_anchor("ObjectMeta", None, None), "ObjectMeta-2");
    }

    #[test]
    fn test_to_markdown() {
        let toc = Toc {
            parts: vec![Part {
                name: "Workloads".to_string(),
                chapters: vec![Chapter {
                    name: "Pod".to_string(),
                    group: Some(APIGroup::core()),
                    version: Some(APIVersion::parse("v1").unwrap()),
                    anchor: "Pod-v1".to_string(),
                    key: Key::new("io.k8s.api.core.v1.Pod"),
                    sections: vec![
                        Section {
                            name: "Pod".to_string(),
                            key: Key::new("io.k8s.api.core.v1.Pod"),
                            definition: Schema::default(),
                        },
                        Section {
                            name: "PodSpec".to_string(),
                            key: Key::new("io.k8s.api.core.v1.PodSpec"),
                            definition: Schema::default(),
                        },
                    ],
                }],
            }],
            ..Default::default()
        };

        let mut out = Vec::new();
        toc.to_markdown(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\n## Workloads\n### Pod\n#### Pod\n#### PodSpec\n"
        );
    }
}

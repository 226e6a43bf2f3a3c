//! Locations of documented definitions

use k8s_api_reference_common::{APIVersion, Key};
use std::collections::BTreeMap;

/// Location of a documented section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEnd {
    pub part: String,
    /// Chapter anchor, see [`chapter_anchor`]
    pub chapter: String,
    pub section: String,
}

impl LinkEnd {
    pub fn new(part: &str, chapter: &str, section: &str) -> Self {
        Self {
            part: part.to_string(),
            chapter: chapter.to_string(),
            section: section.to_string(),
        }
    }
}

/// Anchor of a chapter, `Pod-v1` for resources and `ObjectMeta` for plain definitions
pub fn chapter_anchor(name: &str, version: Option<&APIVersion>) -> String {
    match version {
        Some(version) => format!("{}-{}", name, version),
        None => name.to_string(),
    }
}

/// Definition key to the section documenting it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkEnds(BTreeMap<Key, LinkEnd>);

impl LinkEnds {
    pub fn add(&mut self, key: Key, link_end: LinkEnd) {
        self.0.insert(key, link_end);
    }

    pub fn get(&self, key: &Key) -> Option<&LinkEnd> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Definition key to the places (section names or dotted property paths)
/// where the definition is documented
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentedDefinitions(BTreeMap<Key, Vec<String>>);

impl DocumentedDefinitions {
    /// Record the section documenting `key`, replacing previous locations
    pub fn set(&mut self, key: Key, location: &str) {
        self.0.insert(key, vec![location.to_string()]);
    }

    /// Record one more place where `key` is documented inline
    pub fn add(&mut self, key: Key, location: String) {
        self.0.entry(key).or_default().push(location);
    }

    pub fn get(&self, key: &Key) -> &[String] {
        self.0.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_anchor() {
        let v1 = APIVersion::parse("v1beta1").unwrap();
        assert_eq!(chapter_anchor("CronJob", Some(&v1)), "CronJob-v1beta1");
        assert_eq!(chapter_anchor("ObjectMeta", None), "ObjectMeta");
    }

    #[test]
    fn test_documented_definitions() {
        let mut documented = DocumentedDefinitions::default();
        let key = Key::new("io.k8s.api.core.v1.Container");
        documented.add(key.clone(), "spec.containers".to_string());
        documented.add(key.clone(), "spec.initContainers".to_string());
        assert_eq!(documented.get(&key), ["spec.containers", "spec.initContainers"]);

        documented.set(key.clone(), "Container");
        assert_eq!(documented.get(&key), ["Container"]);
        assert!(documented.get(&Key::new("missing")).is_empty());
    }
}

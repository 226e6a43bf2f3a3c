//! Resource index and definition resolver over the Kubernetes specification

use super::extensions::GvkMarker;
use super::resource::{Resource, ResourceId};
use crate::openapi::Schema;
use k8s_api_reference_common::{gv_string, APIGroup, APIVersion, Key, Result};
use std::collections::BTreeMap;

/// Maps a Group/Version (`v1`, `apps/v1`) to the definition key prefixes
/// (without Kind) where definitions of that GV were found
///
/// e.g. `"v1" => ["io.k8s.api.core.v1"]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GvToKeyMap(BTreeMap<String, Vec<Key>>);

impl GvToKeyMap {
    /// Register the container of `key` under the resource's GV, once
    pub fn add(&mut self, key: &Key, resource: &Resource) {
        let prefix = key.container();
        let prefixes = self.0.entry(resource.gv()).or_default();
        if !prefixes.contains(&prefix) {
            prefixes.push(prefix);
        }
    }

    /// Prefixes registered for a GV string, in registration order
    pub fn prefixes(&self, gv: &str) -> &[Key] {
        self.0.get(gv).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Key])> {
        self.0.iter().map(|(gv, keys)| (gv.as_str(), keys.as_slice()))
    }
}

/// Resource index under construction
///
/// Resources are inserted with [`ResourceIndex::add`], which maintains the
/// replacement relation and the newest-first order of each Kind. Once every
/// definition has been visited the index is turned into a read-mostly
/// [`Spec`] with [`ResourceIndex::finalize`].
#[derive(Debug, Default)]
pub struct ResourceIndex {
    definitions: BTreeMap<Key, Schema>,
    resources: Vec<Resource>,
    by_kind: BTreeMap<String, Vec<ResourceId>>,
    gv_to_key: GvToKeyMap,
}

impl ResourceIndex {
    /// Empty index over a set of definitions
    pub fn new(definitions: BTreeMap<Key, Schema>) -> Self {
        Self {
            definitions,
            ..Default::default()
        }
    }

    /// Index every definition carrying a group/version/kind marker
    pub fn build(definitions: BTreeMap<Key, Schema>) -> Result<Spec> {
        let mut index = Self::new(definitions);

        let mut found = Vec::new();
        for (key, definition) in &index.definitions {
            if let Some(marker) = GvkMarker::decode(key.as_str(), definition)? {
                found.push(Resource::new(key.clone(), marker, definition.clone()));
            }
        }
        for resource in found {
            index.add(resource);
        }

        tracing::debug!(
            definitions = index.definitions.len(),
            resources = index.resources.len(),
            kinds = index.by_kind.len(),
            "built resource index"
        );
        Ok(index.finalize())
    }

    /// Insert a resource
    ///
    /// The first resource of the same Kind in a replacement relation with the
    /// new one (in either direction) has the loser's `replaced_by` set to the
    /// winner's key; the scan stops there. The resource is then inserted in
    /// front of the first resource it is newer than.
    ///
    /// A second definition for an already indexed group/version/kind is
    /// skipped with a warning; the first one stays indexed.
    pub fn add(&mut self, mut resource: Resource) {
        let list = self.by_kind.entry(resource.kind.clone()).or_default();
        if let Some(existing) = list.iter().map(|id| &self.resources[id.0]).find(|other| {
            other.matches(&resource.group, &resource.version, &resource.kind)
        }) {
            tracing::warn!(
                gvk = %format!("{}/{}", resource.gv(), resource.kind),
                indexed = %existing.key,
                skipped = %resource.key,
                "duplicate group/version/kind"
            );
            return;
        }

        let id = ResourceId(self.resources.len());
        self.gv_to_key.add(&resource.key, &resource);

        for other_id in list.iter() {
            let other = &mut self.resources[other_id.0];
            if resource.replaces(other) {
                tracing::trace!(old = %other.key, new = %resource.key, "resource replaced");
                other.replaced_by = Some(resource.key.clone());
                break;
            } else if other.replaces(&resource) {
                tracing::trace!(old = %resource.key, new = %other.key, "resource replaced");
                resource.replaced_by = Some(other.key.clone());
                break;
            }
        }

        let position = list
            .iter()
            .position(|other_id| resource.is_newer_than(&self.resources[other_id.0]))
            .unwrap_or(list.len());
        list.insert(position, id);

        self.resources.push(resource);
    }

    /// Close the building phase
    pub fn finalize(self) -> Spec {
        Spec {
            definitions: self.definitions,
            resources: self.resources,
            by_kind: self.by_kind,
            gv_to_key: self.gv_to_key,
        }
    }
}

/// The Kubernetes API specification with its resource index
///
/// After finalization the only mutation is flagging resources as documented
/// through [`Spec::get_resource`], which needs exclusive access.
#[derive(Debug)]
pub struct Spec {
    definitions: BTreeMap<Key, Schema>,
    resources: Vec<Resource>,
    by_kind: BTreeMap<String, Vec<ResourceId>>,
    gv_to_key: GvToKeyMap,
}

impl Spec {
    /// Find the definition referenced by group/version/kind
    ///
    /// Resources of the Kind are searched first; `mark_documented` flags the
    /// matching one. When the Kind has no resources at all, the definition
    /// prefixes registered for the GV are searched for `<prefix>.<kind>`.
    pub fn get_resource(
        &mut self,
        group: &APIGroup,
        version: &APIVersion,
        kind: &str,
        mark_documented: bool,
    ) -> Option<(Key, &Schema)> {
        if self.by_kind.contains_key(kind) {
            return self.get_indexed_resource(group, version, kind, mark_documented);
        }

        let gv = gv_string(group, version);
        for prefix in self.gv_to_key.prefixes(&gv) {
            let key = Key::new(format!("{}.{}", prefix, kind));
            if let Some(definition) = self.definitions.get(&key) {
                return Some((key, definition));
            }
        }
        None
    }

    /// Find the resource of a Kind at group/version, without the GV-prefix fallback
    ///
    /// Only definitions carrying a group/version/kind marker are found.
    pub fn get_indexed_resource(
        &mut self,
        group: &APIGroup,
        version: &APIVersion,
        kind: &str,
        mark_documented: bool,
    ) -> Option<(Key, &Schema)> {
        let id = self
            .by_kind
            .get(kind)?
            .iter()
            .copied()
            .find(|id| self.resources[id.0].matches(group, version, kind))?;
        let resource = &mut self.resources[id.0];
        if mark_documented {
            resource.documented = true;
        }
        Some((resource.key.clone(), &resource.definition))
    }

    /// Find a definition by its full key
    pub fn get_definition(&self, key: &Key) -> Option<&Schema> {
        self.definitions.get(key)
    }

    pub fn definitions(&self) -> &BTreeMap<Key, Schema> {
        &self.definitions
    }

    /// All resources, in index insertion order
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    /// Kinds, alphabetically
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.by_kind.keys().map(String::as_str)
    }

    /// Resources of a Kind, newest first
    pub fn resources_of<'a>(&'a self, kind: &str) -> impl Iterator<Item = &'a Resource> + 'a {
        self.by_kind
            .get(kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(move |id| &self.resources[id.0])
    }

    /// Resources neither replaced nor documented, by Kind then newest first
    pub fn undocumented_resources(&self) -> Vec<&Resource> {
        self.by_kind
            .values()
            .flatten()
            .map(|id| &self.resources[id.0])
            .filter(|r| r.replaced_by.is_none() && !r.documented)
            .collect()
    }

    pub fn gv_to_key(&self) -> &GvToKeyMap {
        &self.gv_to_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(key: &str, group: &str, version: &str, kind: &str) -> Resource {
        Resource::new(
            Key::new(key),
            GvkMarker {
                group: APIGroup::new(group),
                version: APIVersion::parse(version).unwrap(),
                kind: kind.to_string(),
            },
            Schema::default(),
        )
    }

    #[test]
    fn test_add_groups_by_kind_and_orders_newest_first() {
        let mut index = ResourceIndex::default();
        index.add(resource("io.k8s.api.extensions.v1.Kind1", "extensions", "v1", "Kind1"));
        index.add(resource("io.k8s.api.apps.v1.Kind1", "apps", "v1", "Kind1"));
        index.add(resource("io.k8s.api.apps.v1.Kind2", "apps", "v1", "Kind2"));
        let spec = index.finalize();

        assert_eq!(spec.kinds().collect::<Vec<_>>(), vec!["Kind1", "Kind2"]);

        let kind1: Vec<_> = spec.resources_of("Kind1").collect();
        assert_eq!(kind1.len(), 2);
        assert_eq!(kind1[0].group.as_str(), "apps");
        assert_eq!(kind1[1].group.as_str(), "extensions");
        assert_eq!(
            kind1[1].replaced_by,
            Some(Key::new("io.k8s.api.apps.v1.Kind1"))
        );
        assert_eq!(kind1[0].replaced_by, None);
        assert_eq!(spec.resources_of("Kind2").count(), 1);
    }

    #[test]
    fn test_add_marks_every_older_version_replaced() {
        for order in [
            ["v1alpha1", "v1beta1", "v1"],
            ["v1", "v1beta1", "v1alpha1"],
            ["v1beta1", "v1", "v1alpha1"],
        ] {
            let mut index = ResourceIndex::default();
            for version in order {
                let key = format!("io.k8s.api.batch.{}.Job", version);
                index.add(resource(&key, "batch", version, "Job"));
            }
            let spec = index.finalize();
            let jobs: Vec<_> = spec.resources_of("Job").collect();

            let versions: Vec<String> = jobs.iter().map(|r| r.version.to_string()).collect();
            assert_eq!(versions, vec!["v1", "v1beta1", "v1alpha1"], "{:?}", order);

            assert_eq!(jobs[0].replaced_by, None);
            for (position, job) in jobs.iter().enumerate().skip(1) {
                let newer = job.replaced_by.as_ref().expect("older job is replaced");
                let newer_position = jobs.iter().position(|r| &r.key == newer).unwrap();
                assert!(newer_position < position, "{:?}", order);
            }
        }
    }

    #[test]
    fn test_add_skips_duplicate_group_version_kind() {
        let mut index = ResourceIndex::default();
        index.add(resource("io.k8s.api.batch.v1.Job", "batch", "v1", "Job"));
        index.add(resource("io.k8s.other.batch.v1.Job", "batch", "v1", "Job"));
        let spec = index.finalize();

        let jobs: Vec<_> = spec.resources_of("Job").collect();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].key, Key::new("io.k8s.api.batch.v1.Job"));
        assert_eq!(spec.resources().count(), 1);
        assert_eq!(
            spec.gv_to_key().prefixes("batch/v1"),
            &[Key::new("io.k8s.api.batch.v1")]
        );
    }

    #[test]
    fn test_gv_to_key_deduplicates_prefixes() {
        let mut index = ResourceIndex::default();
        index.add(resource("io.k8s.api.core.v1.Pod", "", "v1", "Pod"));
        index.add(resource("io.k8s.api.core.v1.Service", "", "v1", "Service"));
        index.add(resource("io.k8s.other.core.v1.Thing", "", "v1", "Thing"));
        let spec = index.finalize();

        assert_eq!(
            spec.gv_to_key().prefixes("v1"),
            &[Key::new("io.k8s.api.core.v1"), Key::new("io.k8s.other.core.v1")]
        );
        assert!(spec.gv_to_key().prefixes("apps/v1").is_empty());
    }
}

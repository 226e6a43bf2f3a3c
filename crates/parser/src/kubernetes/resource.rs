//! Kubernetes API resources and their supersession order

use super::extensions::GvkMarker;
use crate::openapi::Schema;
use k8s_api_reference_common::{gv_string, APIGroup, APIVersion, Key};
use std::cmp::Ordering;

/// Index of a resource in the resource arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct ResourceId(pub(crate) usize);

/// A Kubernetes API resource: a definition carrying a group/version/kind marker
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub key: Key,
    pub group: APIGroup,
    pub version: APIVersion,
    pub kind: String,
    pub definition: Schema,

    /// Key of the newer resource replacing this one, if any
    pub replaced_by: Option<Key>,
    /// Set once the resource has been included in the table of contents
    pub documented: bool,
}

impl Resource {
    pub fn new(key: Key, marker: GvkMarker, definition: Schema) -> Self {
        Self {
            key,
            group: marker.group,
            version: marker.version,
            kind: marker.kind,
            definition,
            replaced_by: None,
            documented: false,
        }
    }

    /// True if `self` supersedes `other`
    ///
    /// When one group replaces the other the versions are not consulted.
    pub fn replaces(&self, other: &Resource) -> bool {
        if self.group.replaces(&other.group) {
            return true;
        }
        if other.group.replaces(&self.group) {
            return false;
        }
        self.version.replaces(&other.version)
    }

    /// Newest-first ordering between two resources of the same Kind
    ///
    /// Group supersession is decided first; versions only break the tie when
    /// neither group replaces the other.
    pub fn newest_first(&self, other: &Resource) -> Ordering {
        if self.group.replaces(&other.group) {
            return Ordering::Less;
        }
        if other.group.replaces(&self.group) {
            return Ordering::Greater;
        }
        other.version.cmp(&self.version)
    }

    /// True if `self` should be listed before `other`
    pub fn is_newer_than(&self, other: &Resource) -> bool {
        self.newest_first(other) == Ordering::Less
    }

    /// True if the resource is referenced by group/version/kind
    pub fn matches(&self, group: &APIGroup, version: &APIVersion, kind: &str) -> bool {
        &self.group == group && &self.version == version && self.kind == kind
    }

    /// Group/version of the resource as used in `apiVersion:`
    pub fn gv(&self) -> String {
        gv_string(&self.group, &self.version)
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
    fn test_is_newer_than() {
        let cases = [
            // General case
            (("apps", "v1"), ("apps", "v1beta1"), true),
            // CronJob
            (("batch", "v2alpha1"), ("batch", "v1beta1"), true),
            // Event
            (("", "v1"), ("events.k8s.io", "v1"), true),
            (("", "v1"), ("events.k8s.io", "v1beta1"), true),
            // Ingress
            (("networking.k8s.io", "v1beta1"), ("extensions", "v1beta1"), true),
            // Group precedence wins over version
            (("apps", "v1beta1"), ("extensions", "v1"), true),
            (("extensions", "v1"), ("apps", "v1beta1"), false),
            (("apps", "v1"), ("apps", "v1"), false),
        ];
        for ((g1, v1), (g2, v2), expected) in cases {
            let r1 = resource("key1", g1, v1, "Kind");
            let r2 = resource("key2", g2, v2, "Kind");
            assert_eq!(
                r1.is_newer_than(&r2),
                expected,
                "{} newer than {}",
                r1.gv(),
                r2.gv()
            );
        }
    }

    #[test]
    fn test_replaces_by_group_regardless_of_version() {
        let ingress = resource("key1", "networking.k8s.io", "v1beta1", "Ingress");
        let legacy = resource("key2", "extensions", "v1", "Ingress");
        assert!(ingress.replaces(&legacy));
        assert!(!legacy.replaces(&ingress));

        let event = resource("key1", "", "v1alpha1", "Event");
        let other = resource("key2", "events.k8s.io", "v2", "Event");
        assert!(event.replaces(&other));
        assert!(!other.replaces(&event));
    }

    #[test]
    fn test_gv() {
        assert_eq!(resource("k", "apps", "v1", "Deployment").gv(), "apps/v1");
        assert_eq!(resource("k", "", "v1", "Pod").gv(), "v1");
        assert_eq!(
            resource("k", "storage.k8s.io", "v1", "StorageClass").gv(),
            "storage.k8s.io/v1"
        );
    }

    #[test]
    fn test_matches() {
        let pod = resource("io.k8s.api.core.v1.Pod", "", "v1", "Pod");
        let v1 = APIVersion::parse("v1").unwrap();
        assert!(pod.matches(&APIGroup::core(), &v1, "Pod"));
        assert!(!pod.matches(&APIGroup::new("apps"), &v1, "Pod"));
        assert!(!pod.matches(&APIGroup::core(), &v1, "PodList"));
    }
}

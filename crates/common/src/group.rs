//! Kubernetes API groups

use crate::APIVersion;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Legacy group superseded by every other group
const EXTENSIONS_GROUP: &str = "extensions";

/// Group whose Event resource is superseded by the core group
const EVENTS_GROUP: &str = "events.k8s.io";

/// Name of an API group (empty for the core group)
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct APIGroup(String);

impl APIGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The core group (`""`)
    pub fn core() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_core(&self) -> bool {
        self.0.is_empty()
    }

    /// True if resources of `self` supersede resources of `other`
    ///
    /// Only the pairs listed here hold; the relation is neither symmetric nor
    /// transitive:
    /// - any group other than `extensions` replaces `extensions`
    /// - the core group replaces `events.k8s.io`
    pub fn replaces(&self, other: &APIGroup) -> bool {
        if self.0 != EXTENSIONS_GROUP && other.0 == EXTENSIONS_GROUP {
            return true;
        }
        self.is_core() && other.0 == EVENTS_GROUP
    }
}

impl fmt::Display for APIGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for APIGroup {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for APIGroup {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Format a group/version pair as used in `apiVersion:` fields
///
/// ```
/// use k8s_api_reference_common::{gv_string, APIGroup, APIVersion};
///
/// let v1 = APIVersion::parse("v1").unwrap();
/// assert_eq!(gv_string(&APIGroup::core(), &v1), "v1");
/// assert_eq!(gv_string(&APIGroup::new("apps"), &v1), "apps/v1");
/// ```
pub fn gv_string(group: &APIGroup, version: &APIVersion) -> String {
    if group.is_core() {
        version.to_string()
    } else {
        format!("{}/{}", group, version)
    }
}

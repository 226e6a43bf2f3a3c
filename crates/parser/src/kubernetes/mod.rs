//! Kubernetes view of the OpenAPI specification
//!
//! Definitions carrying an `x-kubernetes-group-version-kind` marker are API
//! resources. They are indexed by Kind, newest first, and each older resource
//! records the key of the resource replacing it:
//!
//! - a newer version of the same major in the same group replaces an older one
//!   (`v1beta2` replaces `v1beta1`, `v1` replaces `v1beta1`);
//! - a group can replace another one regardless of versions (`apps` replaces
//!   `extensions`, the core group replaces `events.k8s.io`).

mod extensions;
mod property;
mod resource;
mod spec;

pub use extensions::{
    GvkMarker, PatchStrategy, GVK_EXTENSION, PATCH_MERGE_KEY_EXTENSION, PATCH_STRATEGY_EXTENSION,
};
pub use property::{ordered_property_names, type_name_and_key, Property};
pub use resource::Resource;
pub use spec::{GvToKeyMap, ResourceIndex, Spec};

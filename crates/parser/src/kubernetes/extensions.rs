//! Typed decoding of the `x-kubernetes-*` OpenAPI extensions

use crate::openapi::Schema;
use k8s_api_reference_common::{APIGroup, APIVersion, ReferenceError, Result};
use serde_json::{Map, Value};

pub const GVK_EXTENSION: &str = "x-kubernetes-group-version-kind";
pub const PATCH_STRATEGY_EXTENSION: &str = "x-kubernetes-patch-strategy";
pub const PATCH_MERGE_KEY_EXTENSION: &str = "x-kubernetes-patch-merge-key";

/// Decoded `x-kubernetes-group-version-kind` marker of a definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GvkMarker {
    pub group: APIGroup,
    pub version: APIVersion,
    pub kind: String,
}

impl GvkMarker {
    /// Decode the marker of the definition `key`
    ///
    /// Returns `Ok(None)` when the extension is absent, empty, or lists more
    /// than one group/version/kind. A marker that is present but not shaped as
    /// an array of objects with string `group`, `version` and `kind` fields is
    /// an `InvalidResourceMarker` error.
    pub fn decode(key: &str, schema: &Schema) -> Result<Option<Self>> {
        let Some(extension) = schema.extensions.get(GVK_EXTENSION) else {
            return Ok(None);
        };

        let invalid = |reason: &str| ReferenceError::InvalidResourceMarker {
            key: key.to_string(),
            reason: reason.to_string(),
        };

        let Value::Array(items) = extension else {
            return Err(invalid("not an array"));
        };

        let item = match items.as_slice() {
            [] => return Ok(None),
            [item] => item,
            _ => {
                tracing::trace!(key, count = items.len(), "skipping multi-kind definition");
                return Ok(None);
            }
        };

        let Value::Object(fields) = item else {
            return Err(invalid("element is not an object"));
        };

        let group = string_field(fields, "group").ok_or_else(|| invalid("missing group"))?;
        let version =
            string_field(fields, "version").ok_or_else(|| invalid("missing version"))?;
        let kind = string_field(fields, "kind").ok_or_else(|| invalid("missing kind"))?;

        let version = APIVersion::parse(version)
            .map_err(|e| invalid(&format!("unparseable version: {}", e)))?;

        Ok(Some(Self {
            group: APIGroup::new(group),
            version,
            kind: kind.to_string(),
        }))
    }
}

fn string_field<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    fields.get(name).and_then(Value::as_str)
}

/// Decoded patch strategy of a property
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchStrategy {
    /// `retainKeys` is listed in the strategy
    pub retain_keys: bool,
    /// Merge key, only when `merge` is listed in the strategy
    pub merge_key: Option<String>,
}

impl PatchStrategy {
    /// Decode `x-kubernetes-patch-strategy` and `x-kubernetes-patch-merge-key`
    pub fn decode(schema: &Schema) -> Result<Self> {
        let strategy = optional_string(schema, PATCH_STRATEGY_EXTENSION)?;
        let merge_key = optional_string(schema, PATCH_MERGE_KEY_EXTENSION)?;

        let mut result = PatchStrategy::default();
        if let Some(strategy) = strategy {
            for part in strategy.split(',').map(str::trim) {
                match part {
                    "merge" => result.merge_key = merge_key.map(str::to_string),
                    "retainKeys" => result.retain_keys = true,
                    _ => {}
                }
            }
        }
        Ok(result)
    }

    pub fn is_empty(&self) -> bool {
        !self.retain_keys && self.merge_key.is_none()
    }
}

fn optional_string<'a>(schema: &'a Schema, extension: &str) -> Result<Option<&'a str>> {
    match schema.extensions.get(extension) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(ReferenceError::InvalidExtension {
            extension: extension.to_string(),
            reason: format!("expected a string, got {}", other),
        }),
    }
}

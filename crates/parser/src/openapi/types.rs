//! OpenAPI / Swagger type definitions
//!
//! Simplified representation focusing on the `definitions` section of the
//! Kubernetes specification. Paths and operations are not needed to build the
//! reference and are skipped during deserialization.

use k8s_api_reference_common::Key;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prefix of Swagger 2.0 references
const DEFINITIONS_REF_PREFIX: &str = "#/definitions/";

/// Prefix of OpenAPI 3 references
const COMPONENTS_REF_PREFIX: &str = "#/components/schemas/";

/// OpenAPI document root
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenApiSpec {
    /// Swagger version (e.g., "2.0")
    #[serde(default)]
    pub swagger: Option<String>,

    /// OpenAPI version (e.g., "3.0.0")
    #[serde(default)]
    pub openapi: Option<String>,

    /// API metadata
    #[serde(default)]
    pub info: Option<Info>,

    /// Swagger 2.0 definitions
    #[serde(default)]
    pub definitions: BTreeMap<String, Schema>,

    /// OpenAPI 3 reusable components
    #[serde(default)]
    pub components: Option<Components>,
}

/// API information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    /// API title
    #[serde(default)]
    pub title: String,

    /// API version (e.g., "v1.29.0")
    #[serde(default)]
    pub version: String,
}

/// Reusable components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    /// Schemas
    #[serde(default)]
    pub schemas: BTreeMap<String, Schema>,
}

/// `additionalProperties` is either a boolean or a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<Schema>),
}

/// Schema definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Type: string, number, integer, boolean, array, object
    #[serde(rename = "type")]
    #[serde(default)]
    pub schema_type: Option<String>,

    /// Format (e.g., int32, int64, date-time)
    #[serde(default)]
    pub format: Option<String>,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Properties (for object type)
    #[serde(default)]
    pub properties: BTreeMap<String, Schema>,

    /// Required properties
    #[serde(default)]
    pub required: Vec<String>,

    /// Items schema (for array type)
    #[serde(default)]
    pub items: Option<Box<Schema>>,

    /// Additional properties (for map type)
    #[serde(rename = "additionalProperties")]
    #[serde(default)]
    pub additional_properties: Option<AdditionalProperties>,

    /// OpenAPI 3 wraps described references in a single-element `allOf`
    #[serde(rename = "allOf")]
    #[serde(default)]
    pub all_of: Vec<Schema>,

    /// Reference
    #[serde(rename = "$ref")]
    #[serde(default)]
    pub ref_path: Option<String>,

    /// Extensions (x-kubernetes-*, etc.)
    #[serde(flatten)]
    pub extensions: BTreeMap<String, serde_json::Value>,
}

/// Structural shape of a schema, used to derive display types and links
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaShape<'a> {
    /// `object` with a schema for `additionalProperties`
    Map(&'a Schema),
    /// `array` with an `items` schema
    Array(&'a Schema),
    /// Reference to another definition
    Reference(Key),
    /// Object without a value schema, or schema without any type
    Object,
    /// Scalar type with an optional format
    Primitive {
        kind: &'a str,
        format: Option<&'a str>,
    },
}

impl Schema {
    /// Classify the schema once, maps first, then references, arrays and scalars
    pub fn shape(&self) -> SchemaShape<'_> {
        let schema_type = self.schema_type.as_deref();

        if schema_type == Some("object") {
            if let Some(AdditionalProperties::Schema(value)) = &self.additional_properties {
                return SchemaShape::Map(value);
            }
        }

        if let Some(key) = self.reference_key() {
            return SchemaShape::Reference(key);
        }

        match (schema_type, &self.items) {
            (Some("array"), Some(items)) => SchemaShape::Array(items),
            (None, _) | (Some("object"), _) => SchemaShape::Object,
            (Some(kind), _) => SchemaShape::Primitive {
                kind,
                format: self.format.as_deref(),
            },
        }
    }

    /// Key of the referenced definition, if this schema is a reference
    pub fn reference_key(&self) -> Option<Key> {
        if let Some(ref_path) = &self.ref_path {
            return Some(ref_path_to_key(ref_path));
        }
        match self.all_of.as_slice() {
            [single] => single.ref_path.as_deref().map(ref_path_to_key),
            _ => None,
        }
    }

    /// Description with surrounding whitespace removed, empty if missing
    pub fn description(&self) -> &str {
        self.description.as_deref().map(str::trim).unwrap_or("")
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

/// Convert a `$ref` pointer into a definition key
fn ref_path_to_key(ref_path: &str) -> Key {
    let name = ref_path
        .strip_prefix(DEFINITIONS_REF_PREFIX)
        .or_else(|| ref_path.strip_prefix(COMPONENTS_REF_PREFIX))
        .unwrap_or_else(|| ref_path.rsplit('/').next().unwrap_or(ref_path));
    Key::new(name)
}

impl OpenApiSpec {
    /// All definitions, from `definitions` (Swagger 2.0) or `components.schemas` (OpenAPI 3)
    pub fn into_definitions(self) -> BTreeMap<Key, Schema> {
        let mut definitions: BTreeMap<Key, Schema> = self
            .definitions
            .into_iter()
            .map(|(k, v)| (Key::new(k), v))
            .collect();
        if let Some(components) = self.components {
            for (k, v) in components.schemas {
                definitions.entry(Key::new(k)).or_insert(v);
            }
        }
        definitions
    }
}

//! Properties of a definition, as displayed in the reference

use super::extensions::PatchStrategy;
use crate::openapi::{Schema, SchemaShape};
use k8s_api_reference_common::{Key, Result};

/// A property of a definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    /// Display type: `string`, `integer: int64`, `[]Container`, `map[string]string`
    pub display_type: String,
    /// Key of the referenced definition, through maps and arrays
    pub type_key: Option<Key>,
    pub description: String,
    pub required: bool,
    pub merge_key: Option<String>,
    pub retain_keys: bool,
}

impl Property {
    /// Build the property `name` with the schema `details`
    ///
    /// `required` is the required list of the definition owning the property.
    pub fn new(name: &str, details: &Schema, required: &[String]) -> Result<Self> {
        let (display_type, type_key) = type_name_and_key(details);
        let patch = PatchStrategy::decode(details)?;

        Ok(Self {
            name: name.to_string(),
            display_type,
            type_key,
            description: details.description().to_string(),
            required: required.iter().any(|r| r == name),
            merge_key: patch.merge_key,
            retain_keys: patch.retain_keys,
        })
    }

    /// Human-readable patch strategy, if any
    pub fn patch_strategy_text(&self) -> Option<String> {
        match (self.retain_keys, &self.merge_key) {
            (true, Some(key)) => Some(format!(
                "Patch strategies: retainKeys, merge on key `{}`",
                key
            )),
            (false, Some(key)) => Some(format!("Patch strategy: merge on key `{}`", key)),
            (true, None) => Some("Patch strategy: retainKeys".to_string()),
            (false, None) => None,
        }
    }
}

/// Display type of a schema and the key of the definition it refers to
pub fn type_name_and_key(schema: &Schema) -> (String, Option<Key>) {
    match schema.shape() {
        SchemaShape::Map(value) => {
            let (name, key) = type_name_and_key(value);
            (format!("map[string]{}", name), key)
        }
        SchemaShape::Array(items) => {
            let (name, key) = type_name_and_key(items);
            (format!("[]{}", name), key)
        }
        SchemaShape::Reference(key) => (key.resource_name().to_string(), Some(key)),
        SchemaShape::Object => ("object".to_string(), None),
        SchemaShape::Primitive { kind, format } => match format {
            Some(format) => (format!("{}: {}", kind, format), None),
            None => (kind.to_string(), None),
        },
    }
}

/// Property names of a definition: required ones first, each group alphabetically
pub fn ordered_property_names(schema: &Schema) -> Vec<&str> {
    // properties is a BTreeMap, iteration is already alphabetical
    let (mut names, optional): (Vec<&str>, Vec<&str>) = schema
        .properties
        .keys()
        .map(String::as_str)
        .partition(|name| schema.is_required(name));
    names.extend(optional);
    names
}

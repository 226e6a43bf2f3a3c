//! Recursive expansion of the properties of a definition
//!
//! A property referring to a definition documented in its own section is
//! emitted as a link. A property referring to any other definition is
//! expanded in place: the nested properties are listed under it, with their
//! dotted path (`spec.containers.name`).

use crate::link_ends::{DocumentedDefinitions, LinkEnd, LinkEnds};
use k8s_api_reference_common::{Key, Result};
use k8s_api_reference_parser::kubernetes::ordered_property_names;
use k8s_api_reference_parser::{Property, Schema, Spec};

/// A property with its link or its inlined properties
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedProperty {
    /// Dotted path from the section definition
    pub path: String,
    pub property: Property,
    /// Section documenting the property type
    pub link: Option<LinkEnd>,
    /// Description of the inlined type, when it has one
    pub type_description: Option<String>,
    /// Properties of the inlined type
    pub children: Vec<ExpandedProperty>,
}

impl ExpandedProperty {
    pub fn is_inlined(&self) -> bool {
        !self.children.is_empty()
    }
}

pub struct PropertyExpander<'a> {
    spec: &'a Spec,
    link_ends: &'a LinkEnds,
}

impl<'a> PropertyExpander<'a> {
    pub fn new(spec: &'a Spec, link_ends: &'a LinkEnds) -> Self {
        Self { spec, link_ends }
    }

    /// Expand the properties of the definition `key`
    ///
    /// Inlined definitions are recorded in `documented` with the path of the
    /// property they are expanded under.
    pub fn expand(
        &self,
        key: &Key,
        definition: &Schema,
        documented: &mut DocumentedDefinitions,
    ) -> Result<Vec<ExpandedProperty>> {
        let mut branch = vec![key.clone()];
        self.expand_properties(definition, "", &mut branch, documented)
    }

    fn expand_properties(
        &self,
        definition: &Schema,
        prefix: &str,
        branch: &mut Vec<Key>,
        documented: &mut DocumentedDefinitions,
    ) -> Result<Vec<ExpandedProperty>> {
        let mut result = Vec::with_capacity(definition.properties.len());

        for name in ordered_property_names(definition) {
            let details = &definition.properties[name];
            let property = Property::new(name, details, &definition.required)?;
            let path = format!("{}{}", prefix, name);

            let mut expanded = ExpandedProperty {
                path,
                property,
                link: None,
                type_description: None,
                children: Vec::new(),
            };

            if let Some(type_key) = expanded.property.type_key.clone() {
                if let Some(link) = self.link_ends.get(&type_key) {
                    expanded.link = Some(link.clone());
                } else if branch.contains(&type_key) {
                    tracing::warn!(
                        key = %type_key,
                        path = %expanded.path,
                        "recursive definition, not expanded again"
                    );
                } else if let Some(nested) = self.spec.get_definition(&type_key) {
                    documented.add(type_key.clone(), expanded.path.clone());

                    let description = nested.description();
                    if !description.is_empty() {
                        expanded.type_description = Some(description.to_string());
                    }

                    branch.push(type_key);
                    let nested_prefix = format!("{}.", expanded.path);
                    let children =
                        self.expand_properties(nested, &nested_prefix, branch, documented);
                    branch.pop();
                    expanded.children = children?;
                } else {
                    tracing::debug!(key = %type_key, "referenced definition not found");
                }
            }

            result.push(expanded);
        }

        Ok(result)
    }
}

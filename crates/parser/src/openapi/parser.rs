//! OpenAPI spec file parser

use super::types::OpenApiSpec;
use crate::kubernetes::{ResourceIndex, Spec};
use k8s_api_reference_common::{ReferenceError, Result};
use std::fs;
use std::path::Path;

/// OpenAPI specification parser
///
/// Reads the Kubernetes OpenAPI (Swagger) specification and builds the
/// resource index over its definitions.
pub struct OpenApiParser {
    /// Loaded OpenAPI spec
    spec: OpenApiSpec,
}

impl OpenApiParser {
    /// Load OpenAPI spec from file path
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = OpenApiParser::from_file("api/v1.29/swagger.json")?;
    /// let spec = parser.parse()?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ReferenceError::Parse(format!(
                "Failed to read OpenAPI file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_json(&content)
    }

    /// Parse OpenAPI spec from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: OpenApiSpec = serde_json::from_str(json)
            .map_err(|e| ReferenceError::Parse(format!("Failed to parse OpenAPI JSON: {}", e)))?;

        tracing::debug!(
            definitions = spec.definitions.len(),
            "loaded OpenAPI document"
        );
        Ok(Self { spec })
    }

    /// Build the resource index and return the finalized spec
    pub fn parse(self) -> Result<Spec> {
        ResourceIndex::build(self.spec.into_definitions())
    }

    /// Get reference to the underlying OpenAPI spec
    pub fn spec(&self) -> &OpenApiSpec {
        &self.spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_swagger() {
        let swagger_json = r#"{
            "swagger": "2.0",
            "info": {
                "title": "Kubernetes",
                "version": "v1.29.0"
            },
            "paths": {},
            "definitions": {}
        }"#;

        let parser = OpenApiParser::from_json(swagger_json);
        assert!(parser.is_ok());

        let parser = parser.unwrap();
        assert_eq!(parser.spec().swagger.as_deref(), Some("2.0"));
        assert_eq!(
            parser.spec().info.as_ref().map(|i| i.title.as_str()),
            Some("Kubernetes")
        );

        let spec = parser.parse().unwrap();
        assert_eq!(spec.resources().count(), 0);
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        let result = OpenApiParser::from_json("{ not json");
        assert!(matches!(result, Err(ReferenceError::Parse(_))));
    }
}

//! Common types and utilities for the Kubernetes API reference generator
//!
//! This crate contains the shared error type and the small value types
//! (API versions, API groups, definition keys) used across the parser,
//! generator, and CLI components.

mod group;
mod key;
mod version;

pub use group::{gv_string, APIGroup};
pub use key::Key;
pub use version::{APIVersion, Stage};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building the API reference
#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Malformed API version: {0:?}")]
    MalformedVersion(String),

    #[error("Invalid x-kubernetes-group-version-kind on {key}: {reason}")]
    InvalidResourceMarker { key: String, reason: String },

    #[error("Invalid {extension} extension: {reason}")]
    InvalidExtension { extension: String, reason: String },

    #[error("Resource {0} not found in spec")]
    ResourceNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Output error on {}: {reason}", path.display())]
    Output { path: PathBuf, reason: String },

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for reference generation operations
pub type Result<T> = std::result::Result<T, ReferenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ReferenceError::ResourceNotFound("apps/v1/Deployment".to_string());
        assert_eq!(err.to_string(), "Resource apps/v1/Deployment not found in spec");

        let err = ReferenceError::Output {
            path: PathBuf::from("/tmp/out"),
            reason: "directory must be empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Output error on /tmp/out: directory must be empty"
        );
    }
}

//! Kubernetes OpenAPI parsing for the API reference generator
//!
//! This crate reads the Kubernetes OpenAPI (Swagger) specification and builds
//! the resource index the reference is generated from.
//!
//! ## Pipeline
//!
//! 1. [`OpenApiParser`] deserializes the document into its definitions
//! 2. [`ResourceIndex`] indexes every definition carrying a group/version/kind
//!    marker and computes which resources replace which
//! 3. [`Spec`] resolves definitions by key or by group/version/kind
//!
//! ```rust,ignore
//! use k8s_api_reference_parser::parse_spec_file;
//!
//! let mut spec = parse_spec_file("swagger.json")?;
//! ```

pub mod kubernetes;
pub mod openapi;

pub use kubernetes::{Property, Resource, ResourceIndex, Spec};
pub use openapi::{OpenApiParser, Schema, SchemaShape};

use k8s_api_reference_common::Result;
use std::path::Path;

/// Parse a specification file and build its resource index
pub fn parse_spec_file<P: AsRef<Path>>(path: P) -> Result<Spec> {
    OpenApiParser::from_file(path)?.parse()
}

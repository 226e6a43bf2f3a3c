//! OpenAPI (Swagger) specification parser
//!
//! Parses the Kubernetes OpenAPI specification into its definitions map and
//! builds the resource index over it.
//!
//! ## Sources
//! - From a cluster: `kubectl proxy && curl http://localhost:8001/openapi/v2`
//! - From GitHub: `https://github.com/kubernetes/kubernetes/blob/master/api/openapi-spec/swagger.json`
//!
//! Both Swagger 2.0 `definitions` and OpenAPI 3 `components.schemas` are read.
//!
//! ## Usage
//! ```rust,ignore
//! use k8s_api_reference_parser::openapi::OpenApiParser;
//!
//! let spec = OpenApiParser::from_file("swagger.json")?.parse()?;
//! ```

mod parser;
mod types;

pub use parser::OpenApiParser;
pub use types::*;

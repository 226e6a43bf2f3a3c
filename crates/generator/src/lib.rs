//! Documentation generation for the Kubernetes API reference
//!
//! This crate turns the resource index built by the parser into documents:
//! it populates the table of contents from its configuration, expands the
//! properties of every documented definition and renders the result through
//! an output backend (Hugo markdown or DocBook).

pub mod config;
mod document;
pub mod expander;
pub mod link_ends;
pub mod markdown;
pub mod outputs;
mod templates;
pub mod toc;

pub use config::{ChapterConfig, PartConfig, TocConfig};
pub use document::output_document;
pub use expander::{ExpandedProperty, PropertyExpander};
pub use link_ends::{DocumentedDefinitions, LinkEnd, LinkEnds};
pub use outputs::{DocBook, Hugo, OutputBackend};
pub use toc::{Chapter, Part, Section, Toc};

use k8s_api_reference_common::Result;
use k8s_api_reference_parser::Spec;
use std::path::Path;

/// Reference generator
///
/// Owns the specification and its populated table of contents:
/// - configured parts and chapters
/// - an "Other Resources" part with every remaining resource
pub struct ReferenceGenerator {
    spec: Spec,
    toc: Toc,
}

impl ReferenceGenerator {
    /// Populate the table of contents of `spec` from `config`
    pub fn new(mut spec: Spec, config: &TocConfig) -> Result<Self> {
        let mut toc = Toc::populate(config, &mut spec)?;
        toc.add_other_resources(&mut spec)?;
        Ok(Self { spec, toc })
    }

    pub fn toc(&self) -> &Toc {
        &self.toc
    }

    pub fn spec(&self) -> &Spec {
        &self.spec
    }

    /// Render the reference through any backend
    pub fn generate(&mut self, backend: &mut dyn OutputBackend) -> Result<()> {
        output_document(&mut self.toc, &self.spec, backend)
    }

    /// Generate Hugo content into an existing, empty directory
    pub fn generate_hugo(&mut self, output_dir: &Path) -> Result<()> {
        let mut hugo = Hugo::new(output_dir)?;
        self.generate(&mut hugo)
    }

    /// Generate a DocBook book into an existing, empty directory
    pub fn generate_docbook(&mut self, output_dir: &Path) -> Result<()> {
        let mut docbook = DocBook::new(output_dir)?;
        self.generate(&mut docbook)
    }
}

//! Output backends
//!
//! The document driver walks the populated table of contents and calls an
//! [`OutputBackend`] in document order:
//!
//! ```text
//! prepare
//!   add_part
//!     add_chapter, set_api_version, set_go_import
//!       add_section, add_content
//!         start_property_list
//!           add_property [add_type_definition start_property_list ... end_property_list] end_property
//!         end_property_list
//! terminate
//! ```
//!
//! Nothing may be written to the target before `terminate`.

mod docbook;
mod hugo;

pub use docbook::DocBook;
pub use hugo::Hugo;

use crate::link_ends::LinkEnd;
use k8s_api_reference_common::{ReferenceError, Result};
use k8s_api_reference_parser::Property;
use std::fs;
use std::path::Path;

/// A document format the reference can be rendered to
pub trait OutputBackend {
    /// Check the target and set up the document
    fn prepare(&mut self) -> Result<()>;

    fn add_part(&mut self, index: usize, name: &str) -> Result<()>;

    /// Open a chapter; `anchor` is unique in the document and is the target
    /// of every link to the chapter's sections
    fn add_chapter(
        &mut self,
        index: usize,
        name: &str,
        anchor: &str,
        short_description: &str,
    ) -> Result<()>;

    fn set_api_version(&mut self, api_version: &str) -> Result<()>;

    /// Display-only Go import path of the chapter's package
    fn set_go_import(&mut self, go_import: &str) -> Result<()>;

    fn add_section(&mut self, index: usize, name: &str) -> Result<()>;

    fn add_content(&mut self, text: &str) -> Result<()>;

    /// Description of an inlined type, before its nested property list
    fn add_type_definition(&mut self, text: &str) -> Result<()>;

    fn start_property_list(&mut self) -> Result<()>;

    /// Open a property; nested lists and `end_property` follow
    fn add_property(
        &mut self,
        name: &str,
        property: &Property,
        link: Option<&LinkEnd>,
        nested: bool,
    ) -> Result<()>;

    fn end_property(&mut self) -> Result<()>;

    fn end_property_list(&mut self) -> Result<()>;

    /// Finish the document and write it out
    fn terminate(&mut self) -> Result<()>;
}

/// Fail unless `dir` is an existing, empty directory
pub(crate) fn ensure_empty_dir(dir: &Path) -> Result<()> {
    let mut entries = fs::read_dir(dir).map_err(|e| ReferenceError::Output {
        path: dir.to_path_buf(),
        reason: format!("unable to open directory: {}", e),
    })?;
    if entries.next().is_some() {
        return Err(ReferenceError::Output {
            path: dir.to_path_buf(),
            reason: "directory must be empty".to_string(),
        });
    }
    Ok(())
}

/// Write `content` to `path`, creating parent directories
pub(crate) fn write_file(path: &Path, content: &str) -> Result<()> {
    let output_error = |e: std::io::Error| ReferenceError::Output {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(output_error)?;
    }
    fs::write(path, content).map_err(output_error)
}

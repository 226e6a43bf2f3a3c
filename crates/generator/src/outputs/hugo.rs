//! Markdown output for a Hugo website
//!
//! ```text
//! <dir>/_index.md
//! <dir>/workloads/_index.md
//! <dir>/workloads/pod-v1.md
//! ```

use super::{ensure_empty_dir, write_file, OutputBackend};
use crate::link_ends::LinkEnd;
use crate::markdown;
use crate::templates::{self, HUGO_CHAPTER, HUGO_INDEX};
use k8s_api_reference_common::{ReferenceError, Result};
use k8s_api_reference_parser::Property;
use std::path::PathBuf;
use tera::{Context, Tera};

const INDEX_FILE: &str = "_index.md";
const ROOT_TITLE: &str = "Resources";
const DOCS_ROOT: &str = "/docs";

/// Hugo content directory
pub struct Hugo {
    directory: PathBuf,
    tera: Tera,
    /// Files to write at `terminate`, relative to `directory`
    files: Vec<(PathBuf, String)>,
    part: Option<String>,
    /// Nesting depth of property lists
    depth: usize,
}

impl Hugo {
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            directory: directory.into(),
            tera: templates::load_templates()?,
            files: Vec::new(),
            part: None,
            depth: 0,
        })
    }

    fn current(&mut self) -> Result<&mut String> {
        self.files
            .last_mut()
            .map(|(_, content)| content)
            .ok_or_else(|| ReferenceError::Generation("no chapter started".to_string()))
    }

    fn add_index(&mut self, subdir: Option<&str>, title: &str, weight: usize) -> Result<()> {
        let mut context = Context::new();
        context.insert("title", title);
        context.insert("weight", &weight);
        let rendered = templates::render(&self.tera, HUGO_INDEX, &context)?;

        let path = match subdir {
            Some(subdir) => PathBuf::from(subdir).join(INDEX_FILE),
            None => PathBuf::from(INDEX_FILE),
        };
        self.files.push((path, rendered));
        Ok(())
    }

    /// Indentation of the property list items at the current depth
    fn indent(&self) -> String {
        "  ".repeat(self.depth.saturating_sub(1))
    }
}

/// Link to a section, keeping `[]` and `map[string]` prefixes out of the anchor
///
/// `[]Container` linked to `Workloads/Pod-v1/Container` gives
/// `[]<a href="{{< ref "/docs/workloads/pod-v1#container" >}}">Container</a>`.
pub fn link_end(link: &LinkEnd, display_type: &str) -> String {
    let (prefix, typename) = markdown::split_type_prefix(display_type);
    format!(
        "{}<a href=\"{{{{< ref \"{}/{}/{}#{}\" >}}}}\">{}</a>",
        prefix,
        DOCS_ROOT,
        markdown::escape_name(&link.part),
        markdown::escape_name(&link.chapter),
        markdown::escape_name(&link.section),
        typename
    )
}

impl OutputBackend for Hugo {
    fn prepare(&mut self) -> Result<()> {
        ensure_empty_dir(&self.directory)?;
        self.add_index(None, ROOT_TITLE, 0)
    }

    fn add_part(&mut self, index: usize, name: &str) -> Result<()> {
        let subdir = markdown::escape_name(name);
        self.add_index(Some(&subdir), name, index + 1)?;
        self.part = Some(subdir);
        Ok(())
    }

    fn add_chapter(
        &mut self,
        index: usize,
        name: &str,
        anchor: &str,
        short_description: &str,
    ) -> Result<()> {
        let part = self.part.clone().ok_or_else(|| {
            ReferenceError::Generation(format!("chapter {} outside a part", name))
        })?;

        let mut context = Context::new();
        context.insert("title", name);
        context.insert("description", short_description);
        context.insert("weight", &(index + 1));
        let rendered = templates::render(&self.tera, HUGO_CHAPTER, &context)?;

        let filename = format!("{}.md", markdown::escape_name(anchor));
        self.files.push((PathBuf::from(part).join(filename), rendered));
        self.depth = 0;
        Ok(())
    }

    fn set_api_version(&mut self, api_version: &str) -> Result<()> {
        let line = markdown::code(&format!("apiVersion: {}", api_version));
        self.current()?.push_str(&format!("\n{}\n", line));
        Ok(())
    }

    fn set_go_import(&mut self, go_import: &str) -> Result<()> {
        let line = markdown::code(&format!("import \"{}\"", go_import));
        self.current()?.push_str(&format!("\n{}\n", line));
        Ok(())
    }

    fn add_section(&mut self, _index: usize, name: &str) -> Result<()> {
        let heading = markdown::section(name);
        self.current()?.push_str(&format!("\n{}", heading));
        Ok(())
    }

    fn add_content(&mut self, text: &str) -> Result<()> {
        if !text.is_empty() {
            self.current()?.push_str(&format!("\n{}\n", text));
        }
        Ok(())
    }

    fn add_type_definition(&mut self, text: &str) -> Result<()> {
        let indent = format!("{}  ", self.indent());
        let text = markdown::indent(&format!("*{}*", text), &indent);
        self.current()?.push_str(&format!("\n{}", text));
        Ok(())
    }

    fn start_property_list(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth == 1 {
            self.current()?.push('\n');
        }
        Ok(())
    }

    fn add_property(
        &mut self,
        name: &str,
        property: &Property,
        link: Option<&LinkEnd>,
        _nested: bool,
    ) -> Result<()> {
        let indent = self.indent();
        let display_type = match link {
            Some(link) => link_end(link, &property.display_type),
            None => property.display_type.clone(),
        };
        let required = if property.required { ", required" } else { "" };

        let mut entry = format!("{}- **{}** ({}){}\n", indent, name, display_type, required);
        let inner = format!("{}  ", indent);
        if let Some(patch) = property.patch_strategy_text() {
            entry.push_str(&markdown::indent(&format!("\n*{}*", patch), &inner));
        }
        if !property.description.is_empty() {
            entry.push('\n');
            entry.push_str(&markdown::indent(&property.description, &inner));
        }

        self.current()?.push_str(&format!("\n{}", entry));
        Ok(())
    }

    fn end_property(&mut self) -> Result<()> {
        Ok(())
    }

    fn end_property_list(&mut self) -> Result<()> {
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }

    fn terminate(&mut self) -> Result<()> {
        for (path, content) in &self.files {
            write_file(&self.directory.join(path), content)?;
        }
        tracing::debug!(
            files = self.files.len(),
            directory = %self.directory.display(),
            "wrote Hugo content"
        );
        Ok(())
    }
}

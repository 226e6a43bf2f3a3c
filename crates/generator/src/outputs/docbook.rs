//! DocBook 5 output, a single `index.xml` book

use super::{ensure_empty_dir, write_file, OutputBackend};
use crate::link_ends::LinkEnd;
use crate::markdown::escape_name;
use crate::templates::{self, DOCBOOK_BOOK};
use k8s_api_reference_common::{ReferenceError, Result};
use k8s_api_reference_parser::Property;
use std::fmt::Write as FmtWrite;
use std::path::PathBuf;
use tera::{Context, Tera};

pub const BOOK_FILE: &str = "index.xml";
const BOOK_TITLE: &str = "Kubernetes API Reference";

/// DocBook book written in a directory
pub struct DocBook {
    directory: PathBuf,
    tera: Tera,
    output: String,
    /// Currently open elements
    open: Vec<&'static str>,
    chapter: Option<String>,
}

impl DocBook {
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            directory: directory.into(),
            tera: templates::load_templates()?,
            output: String::new(),
            open: Vec::new(),
            chapter: None,
        })
    }

    fn start(&mut self, name: &'static str, attrs: &[(&str, &str)]) -> Result<()> {
        write!(self.output, "<{}", name)?;
        for (attr, value) in attrs {
            write!(self.output, " {}=\"{}\"", attr, escape_attribute(value))?;
        }
        self.output.push('>');
        self.open.push(name);
        Ok(())
    }

    fn end(&mut self, name: &'static str) -> Result<()> {
        match self.open.pop() {
            Some(open) if open == name => {
                write!(self.output, "</{}>", name)?;
                if matches!(name, "para" | "title" | "varlistentry" | "variablelist") {
                    self.output.push('\n');
                }
                Ok(())
            }
            other => Err(ReferenceError::Generation(format!(
                "closing <{}> while <{}> is open",
                name,
                other.unwrap_or("none")
            ))),
        }
    }

    /// Close every element up to and including `name`, if it is open
    fn close(&mut self, name: &'static str) -> Result<()> {
        if !self.open.contains(&name) {
            return Ok(());
        }
        while let Some(&open) = self.open.last() {
            self.end(open)?;
            if open == name {
                break;
            }
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        self.output.push_str(&escape_text(text));
    }

    fn element_with_text(&mut self, name: &'static str, text: &str) -> Result<()> {
        self.start(name, &[])?;
        self.text(text);
        self.end(name)
    }

    fn paragraphs(&mut self, text: &str, emphasis: bool) -> Result<()> {
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            self.start("para", &[])?;
            if emphasis {
                self.element_with_text("emphasis", line)?;
            } else {
                self.text(line);
            }
            self.end("para")?;
        }
        Ok(())
    }

    fn chapter_anchor(&self) -> Result<&str> {
        self.chapter
            .as_deref()
            .ok_or_else(|| ReferenceError::Generation("section outside a chapter".to_string()))
    }
}

/// Escape XML character data
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape a double-quoted XML attribute value
pub fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

/// Id of a section, shared by the section element and the links to it
pub fn section_id(chapter: &str, section: &str) -> String {
    escape_name(&format!("{}.{}", chapter, section))
}

impl OutputBackend for DocBook {
    fn prepare(&mut self) -> Result<()> {
        ensure_empty_dir(&self.directory)?;

        let mut context = Context::new();
        context.insert("title", BOOK_TITLE);
        self.output = templates::render(&self.tera, DOCBOOK_BOOK, &context)?;
        self.open = vec!["book"];
        Ok(())
    }

    fn add_part(&mut self, _index: usize, name: &str) -> Result<()> {
        self.close("part")?;
        let id = escape_name(name);
        self.start("part", &[("xml:id", id.as_str())])?;
        self.element_with_text("title", name)
    }

    fn add_chapter(
        &mut self,
        _index: usize,
        name: &str,
        anchor: &str,
        short_description: &str,
    ) -> Result<()> {
        self.close("chapter")?;
        let id = escape_name(anchor);
        self.start("chapter", &[("xml:id", id.as_str())])?;
        self.element_with_text("title", name)?;
        if !short_description.is_empty() {
            self.element_with_text("subtitle", short_description)?;
            self.output.push('\n');
        }
        self.chapter = Some(anchor.to_string());
        Ok(())
    }

    fn set_api_version(&mut self, api_version: &str) -> Result<()> {
        self.start("para", &[])?;
        self.element_with_text("code", &format!("apiVersion: {}", api_version))?;
        self.end("para")
    }

    fn set_go_import(&mut self, go_import: &str) -> Result<()> {
        self.start("para", &[])?;
        self.element_with_text("code", &format!("import \"{}\"", go_import))?;
        self.end("para")
    }

    fn add_section(&mut self, _index: usize, name: &str) -> Result<()> {
        self.close("section")?;
        let id = section_id(self.chapter_anchor()?, name);
        self.start("section", &[("xml:id", id.as_str())])?;
        self.element_with_text("title", name)
    }

    fn add_content(&mut self, text: &str) -> Result<()> {
        self.paragraphs(text, false)
    }

    fn add_type_definition(&mut self, text: &str) -> Result<()> {
        self.paragraphs(text, true)
    }

    fn start_property_list(&mut self) -> Result<()> {
        self.start("variablelist", &[])
    }

    fn add_property(
        &mut self,
        name: &str,
        property: &Property,
        link: Option<&LinkEnd>,
        _nested: bool,
    ) -> Result<()> {
        self.start("varlistentry", &[])?;
        self.start("term", &[])?;
        self.element_with_text("varname", name)?;
        self.text(" (");
        self.start("emphasis", &[])?;
        match link {
            Some(link) => {
                let linkend = section_id(&link.chapter, &link.section);
                self.start("link", &[("linkend", linkend.as_str())])?;
                self.text(&property.display_type);
                self.end("link")?;
            }
            None => self.text(&property.display_type),
        }
        self.end("emphasis")?;
        self.text(")");
        if property.required {
            self.text(", required");
        }
        self.end("term")?;
        self.start("listitem", &[])?;

        let patch = match (property.retain_keys, &property.merge_key) {
            (true, Some(key)) => Some(("Patch strategies: retainKeys, merge on key ", Some(key))),
            (false, Some(key)) => Some(("Patch strategy: merge on key ", Some(key))),
            (true, None) => Some(("Patch strategy: retainKeys", None)),
            (false, None) => None,
        };
        if let Some((text, key)) = patch {
            self.start("para", &[])?;
            self.start("emphasis", &[])?;
            self.text(text);
            if let Some(key) = key {
                self.element_with_text("varname", key)?;
            }
            self.end("emphasis")?;
            self.end("para")?;
        }

        self.paragraphs(&property.description, false)
    }

    fn end_property(&mut self) -> Result<()> {
        self.end("listitem")?;
        self.end("varlistentry")
    }

    fn end_property_list(&mut self) -> Result<()> {
        self.end("variablelist")
    }

    fn terminate(&mut self) -> Result<()> {
        self.close("book")?;
        self.output.push('\n');

        let path = self.directory.join(BOOK_FILE);
        write_file(&path, &self.output)?;
        tracing::debug!(path = %path.display(), bytes = self.output.len(), "wrote DocBook");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape_text(r#"a < b && "c" > 'd'"#),
            r#"a &lt; b &amp;&amp; "c" &gt; 'd'"#
        );
        assert_eq!(escape_attribute(r#"say "hi""#), "say &quot;hi&quot;");
    }

    #[test]
    fn test_section_id() {
        assert_eq!(section_id("Pod-v1", "PodSpec"), "pod-v1.podspec");
    }

    #[test]
    fn test_unbalanced_end_is_an_error() {
        let mut book = DocBook::new("unused").unwrap();
        book.start("part", &[]).unwrap();
        assert!(matches!(
            book.end("chapter"),
            Err(ReferenceError::Generation(_))
        ));
    }

    #[test]
    fn test_close_nested_elements() {
        let mut book = DocBook::new("unused").unwrap();
        book.start("part", &[("xml:id", "workloads")]).unwrap();
        book.start("chapter", &[]).unwrap();
        book.start("section", &[]).unwrap();
        book.close("chapter").unwrap();
        assert_eq!(book.open, vec!["part"]);
        assert_eq!(
            book.output,
            r#"<part xml:id="workloads"><chapter><section></section></chapter>"#
        );

        // closing an element that is not open does nothing
        book.close("section").unwrap();
        assert_eq!(book.open, vec!["part"]);
    }
}

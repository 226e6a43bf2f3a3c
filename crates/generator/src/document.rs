//! Rendering of the populated table of contents through an output backend

use crate::expander::{ExpandedProperty, PropertyExpander};
use crate::markdown::first_sentence;
use crate::outputs::OutputBackend;
use crate::toc::{Chapter, Toc};
use k8s_api_reference_common::Result;
use k8s_api_reference_parser::Spec;

/// Render the whole document
///
/// The properties of every section are expanded on the way; inlined
/// definitions are recorded in `toc.documented`.
pub fn output_document<B: OutputBackend + ?Sized>(
    toc: &mut Toc,
    spec: &Spec,
    backend: &mut B,
) -> Result<()> {
    let Toc {
        parts,
        link_ends,
        documented,
        ..
    } = toc;
    let expander = PropertyExpander::new(spec, link_ends);

    backend.prepare()?;
    for (p, part) in parts.iter().enumerate() {
        backend.add_part(p, &part.name)?;

        for (c, chapter) in part.chapters.iter().enumerate() {
            output_chapter_header(c, chapter, backend)?;

            for (s, section) in chapter.sections.iter().enumerate() {
                backend.add_section(s, &section.name)?;
                backend.add_content(section.definition.description())?;

                let properties = expander.expand(&section.key, &section.definition, documented)?;
                output_property_list(&properties, false, backend)?;
            }
        }
    }
    backend.terminate()
}

fn output_chapter_header<B: OutputBackend + ?Sized>(
    index: usize,
    chapter: &Chapter,
    backend: &mut B,
) -> Result<()> {
    let short_description = chapter
        .main_definition()
        .map(|d| first_sentence(d.description()))
        .unwrap_or("");
    backend.add_chapter(index, &chapter.name, &chapter.anchor, short_description)?;

    if let Some(api_version) = chapter.api_version() {
        backend.set_api_version(&api_version)?;
    }
    backend.set_go_import(&chapter.key.container().go_import_prefix())
}

fn output_property_list<B: OutputBackend + ?Sized>(
    properties: &[ExpandedProperty],
    nested: bool,
    backend: &mut B,
) -> Result<()> {
    if properties.is_empty() {
        return Ok(());
    }

    backend.start_property_list()?;
    for expanded in properties {
        backend.add_property(
            &expanded.path,
            &expanded.property,
            expanded.link.as_ref(),
            nested,
        )?;
        if expanded.is_inlined() {
            if let Some(description) = &expanded.type_description {
                backend.add_type_definition(description)?;
            }
            output_property_list(&expanded.children, true, backend)?;
        }
        backend.end_property()?;
    }
    backend.end_property_list()
}

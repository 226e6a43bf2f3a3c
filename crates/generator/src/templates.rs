//! Template loading and management

use k8s_api_reference_common::{ReferenceError, Result};
use std::collections::HashMap;
use tera::{Tera, Value};

pub const HUGO_INDEX: &str = "hugo/index.md";
pub const HUGO_CHAPTER: &str = "hugo/chapter.md";
pub const DOCBOOK_BOOK: &str = "docbook/book.xml";

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.register_filter("quote", quote_filter);

    tera.add_raw_templates(vec![
        (HUGO_INDEX, include_str!("../templates/hugo/index.md.tera")),
        (HUGO_CHAPTER, include_str!("../templates/hugo/chapter.md.tera")),
        (DOCBOOK_BOOK, include_str!("../templates/docbook/book.xml.tera")),
    ])
    .map_err(|e| ReferenceError::Generation(format!("Failed to load templates: {}", e)))?;

    Ok(tera)
}

/// Render a template, mapping tera errors
pub fn render(tera: &Tera, name: &str, context: &tera::Context) -> Result<String> {
    tera.render(name, context)
        .map_err(|e| ReferenceError::Generation(format!("Template error in {}: {:?}", name, e)))
}

fn string_arg<'a>(value: &'a Value, filter: &str) -> tera::Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("{} filter expects a string", filter)))
}

/// Filter to write a string as a double-quoted YAML scalar
fn quote_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = string_arg(value, "quote")?;
    let escaped = s
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n");
    Ok(Value::String(format!("\"{}\"", escaped)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tera::Context;

    #[test]
    fn test_load_templates() {
        let tera = load_templates().unwrap();
        let names: Vec<&str> = tera.get_template_names().collect();
        assert!(names.contains(&HUGO_INDEX));
        assert!(names.contains(&HUGO_CHAPTER));
        assert!(names.contains(&DOCBOOK_BOOK));
    }

    #[test]
    fn test_quote_filter() {
        let value = quote_filter(&Value::String(r#"say "hi""#.to_string()), &HashMap::new());
        assert_eq!(value.unwrap(), Value::String(r#""say \"hi\"""#.to_string()));
        assert!(quote_filter(&Value::Bool(true), &HashMap::new()).is_err());
    }

    #[test]
    fn test_render_part_index() {
        let tera = load_templates().unwrap();
        let mut context = Context::new();
        context.insert("title", "Workloads");
        context.insert("weight", &2);
        assert_eq!(
            render(&tera, HUGO_INDEX, &context).unwrap().trim_end(),
            "---\ntitle: \"Workloads\"\ndraft: false\ncollapsible: true\nweight: 2\n---"
        );

        context.insert("weight", &0);
        assert_eq!(
            render(&tera, HUGO_INDEX, &context).unwrap().trim_end(),
            "---\ntitle: \"Workloads\"\n---"
        );
    }

    #[test]
    fn test_chapter_description_is_quoted() {
        let tera = load_templates().unwrap();
        let mut context = Context::new();
        context.insert("title", "Pod");
        context.insert("description", r#"Pod is a "collection" of containers."#);
        context.insert("weight", &1);
        let rendered = render(&tera, HUGO_CHAPTER, &context).unwrap();
        assert!(rendered.contains(r#"description: "Pod is a \"collection\" of containers.""#));
    }
}

//! Integration tests for the DocBook output

use k8s_api_reference_common::ReferenceError;
use k8s_api_reference_generator::outputs::DocBook;
use k8s_api_reference_generator::{ReferenceGenerator, TocConfig};
use k8s_api_reference_parser::OpenApiParser;
use std::fs;
use tempfile::TempDir;

const SWAGGER: &str = include_str!("fixtures/swagger.json");

const TOC: &str = r#"
parts:
  - name: Workloads
    chapters:
      - name: Pod
        group: ""
        version: v1
      - name: Deployment
        group: apps
        version: v1
  - name: Common Definitions
    chapters:
      - name: ObjectMeta
        key: io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta
"#;

fn generate_book() -> String {
    let spec = OpenApiParser::from_json(SWAGGER).unwrap().parse().unwrap();
    let config = TocConfig::from_yaml(TOC).unwrap();
    let mut generator = ReferenceGenerator::new(spec, &config).unwrap();

    let temp_dir = TempDir::new().unwrap();
    generator.generate_docbook(temp_dir.path()).unwrap();

    let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
    fs::read_to_string(temp_dir.path().join("index.xml")).unwrap()
}

/// Values of every `attr="..."` occurrence
fn attribute_values<'a>(xml: &'a str, attr: &str) -> Vec<&'a str> {
    let pattern = format!("{}=\"", attr);
    xml.match_indices(&pattern)
        .map(|(idx, _)| {
            let rest = &xml[idx + pattern.len()..];
            &rest[..rest.find('"').unwrap()]
        })
        .collect()
}

#[test]
fn test_book_structure() {
    let book = generate_book();

    assert!(book.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(book.contains("<title>Kubernetes API Reference</title>"));
    assert!(book.trim_end().ends_with("</book>"));

    assert_eq!(
        attribute_values(&book, "xml:id")
            .into_iter()
            .filter(|id| !id.contains('.'))
            .collect::<Vec<_>>(),
        vec![
            "workloads",
            "pod-v1",
            "deployment-v1",
            "common-definitions",
            "objectmeta",
            "other-resources",
            "configmap-v1"
        ]
    );

    for element in ["part", "chapter", "section", "variablelist", "varlistentry", "listitem", "para"] {
        let opening = book.matches(&format!("<{}>", element)).count()
            + book.matches(&format!("<{} ", element)).count();
        let closing = book.matches(&format!("</{}>", element)).count();
        assert_eq!(opening, closing, "unbalanced <{}>", element);
    }
}

#[test]
fn test_links_point_to_sections() {
    let book = generate_book();

    let ids = attribute_values(&book, "xml:id");
    let linkends = attribute_values(&book, "linkend");
    assert!(!linkends.is_empty());
    for linkend in linkends {
        assert!(ids.contains(&linkend), "dangling linkend {}", linkend);
    }

    assert!(book.contains(r#"<section xml:id="pod-v1.podspec"><title>PodSpec</title>"#));
    assert!(book.contains(
        r#"<varname>spec</varname> (<emphasis><link linkend="pod-v1.podspec">PodSpec</link></emphasis>)"#
    ));
}

#[test]
fn test_property_entries() {
    let book = generate_book();

    assert!(book.contains(
        "<term><varname>containers</varname> (<emphasis>[]Container</emphasis>), required</term>"
    ));
    assert!(book.contains(
        "<para><emphasis>Patch strategy: merge on key <varname>name</varname></emphasis></para>"
    ));
    assert!(book.contains("<varname>containers.ports.containerPort</varname>"));
    assert!(book.contains(
        "<para><emphasis>A single application container that you want to run within a pod.</emphasis></para>"
    ));
    assert!(book.contains("<para><code>apiVersion: apps/v1</code></para>"));
    assert!(book.contains("<para><code>import \"k8s.io/api/apps/v1\"</code></para>"));
    assert!(book.contains("Number of port to expose on the pod's IP address."));
}

#[test]
fn test_refuses_non_empty_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("index.xml"), "<book/>").unwrap();

    let spec = OpenApiParser::from_json(SWAGGER).unwrap().parse().unwrap();
    let config = TocConfig::from_yaml(TOC).unwrap();
    let mut generator = ReferenceGenerator::new(spec, &config).unwrap();

    let mut docbook = DocBook::new(temp_dir.path()).unwrap();
    let result = generator.generate(&mut docbook);
    assert!(matches!(result, Err(ReferenceError::Output { .. })));
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("index.xml")).unwrap(),
        "<book/>"
    );
}

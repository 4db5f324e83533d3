use super::{parse_document, DocumentOptions, PageMetadata};
use crate::error::ContentError;
use crate::formats::mdx::MdxFormat;
use crate::section::Section;
use std::path::Path;

fn parse(source: &str, options: &DocumentOptions) -> Result<Vec<Section>, ContentError> {
    parse_document(
        Path::new("page.mdx"),
        "/".to_string(),
        source,
        &MdxFormat,
        options,
    )
    .map(|doc| doc.sections)
}

#[test]
fn test_sections_export_preserves_order() {
    let source = "export const sections = [\n  { id: 'zeta', title: 'Zeta' },\n  { id: 'alpha', title: 'Alpha' },\n  { id: 'mid', title: 'Mid', tag: 'GET' },\n]\n\n# Page\n\nText.\n";
    let sections = parse(source, &DocumentOptions::default()).unwrap();
    let ids: Vec<&str> = sections.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["zeta", "alpha", "mid"]);
    assert_eq!(sections[2].tag.as_deref(), Some("GET"));
}

#[test]
fn test_missing_export_is_empty() {
    let source = "# Hello\n\n## World\n\nNo exports here.\n";
    let sections = parse(source, &DocumentOptions::default()).unwrap();
    assert!(sections.is_empty());
}

#[test]
fn test_empty_export() {
    let sections = parse("export const sections = []\n", &DocumentOptions::default()).unwrap();
    assert!(sections.is_empty());
}

#[test]
fn test_export_inside_code_fence_is_ignored() {
    let source = "# Usage\n\n```js\nexport const sections = [{ id: 'x', title: 'X' }]\n```\n";
    let sections = parse(source, &DocumentOptions::default()).unwrap();
    assert!(sections.is_empty(), "got {sections:?}");
}

#[test]
fn test_similar_binding_name_is_not_sections() {
    let source = "export const sectionsDraft = [{ id: 'x', title: 'X' }]\n";
    let sections = parse(source, &DocumentOptions::default()).unwrap();
    assert!(sections.is_empty());
}

#[test]
fn test_malformed_export_is_fatal() {
    let source = "export const sections = [{ id: 'a', title: }]\n";
    let err = parse(source, &DocumentOptions::default()).unwrap_err();
    assert!(
        matches!(err, ContentError::Export { ref name, .. } if name == "sections"),
        "got {err}"
    );
}

#[test]
fn test_computed_export_is_fatal() {
    let source = "export const sections = buildSections()\n";
    assert!(matches!(
        parse(source, &DocumentOptions::default()),
        Err(ContentError::Export { .. })
    ));
}

#[test]
fn test_wrong_shape_is_fatal() {
    let source = "export const sections = [{ id: 'a' }]\n";
    let err = parse(source, &DocumentOptions::default()).unwrap_err();
    assert!(matches!(err, ContentError::Shape { .. }), "got {err}");
}

#[test]
fn test_duplicate_section_ids_are_fatal() {
    let source = "export const sections = [{ id: 'a', title: 'A' }, { id: 'a', title: 'B' }]\n";
    let err = parse(source, &DocumentOptions::default()).unwrap_err();
    assert!(matches!(err, ContentError::DuplicateSection { ref id, .. } if id == "a"));
}

#[test]
fn test_metadata_export() {
    let source = "export const metadata = {\n  title: 'Generics',\n  description: 'Type parameters',\n}\n\n# Generics\n";
    let doc = parse_document(
        Path::new("generics/page.mdx"),
        "/generics".to_string(),
        source,
        &MdxFormat,
        &DocumentOptions::default(),
    )
    .unwrap();
    assert_eq!(
        doc.metadata,
        Some(PageMetadata {
            title: Some("Generics".to_string()),
            description: Some("Type parameters".to_string()),
        })
    );
    assert_eq!(doc.page_path, "/generics");
}

#[test]
fn test_unreadable_metadata_is_dropped() {
    let source = "export const metadata = { title: siteTitle }\nexport const sections = [{ id: 'a', title: 'A' }]\n";
    let doc = parse_document(
        Path::new("page.mdx"),
        "/".to_string(),
        source,
        &MdxFormat,
        &DocumentOptions::default(),
    )
    .unwrap();
    assert_eq!(doc.metadata, None);
    assert_eq!(doc.sections, vec![Section::new("a", "A")]);
}

#[test]
fn test_misshapen_metadata_is_dropped() {
    let source = "export const metadata = { title: 42 }\n";
    let doc = parse_document(
        Path::new("page.mdx"),
        "/".to_string(),
        source,
        &MdxFormat,
        &DocumentOptions::default(),
    )
    .unwrap();
    assert_eq!(doc.metadata, None);
}

#[test]
fn test_headings_ignored_unless_enabled() {
    let source = "# Title\n\n## First\n\n## Second\n";
    assert!(parse(source, &DocumentOptions::default()).unwrap().is_empty());
}

#[test]
fn test_derive_sections_from_headings() {
    let source = "# Title\n\n## Quick start\n\nBody\n\n### Detail\n\n## List posts {{ id: 'list', tag: 'GET' }}\n";
    let options = DocumentOptions {
        derive_from_headings: true,
        max_heading_level: 2,
    };
    let sections = parse(source, &options).unwrap();

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].id, "quick-start");
    assert_eq!(sections[0].title, "Quick start");
    assert_eq!(sections[0].level, Some(2));
    assert_eq!(sections[1].id, "list");
    assert_eq!(sections[1].title, "List posts");
    assert_eq!(sections[1].tag.as_deref(), Some("GET"));
}

#[test]
fn test_derive_includes_deeper_levels_when_configured() {
    let source = "## One\n\n### Two\n\n#### Three\n";
    let options = DocumentOptions {
        derive_from_headings: true,
        max_heading_level: 3,
    };
    let sections = parse(source, &options).unwrap();
    let levels: Vec<Option<usize>> = sections.iter().map(|s| s.level).collect();
    assert_eq!(levels, [Some(2), Some(3)]);
}

#[test]
fn test_export_takes_precedence_over_headings() {
    let source = "export const sections = [{ id: 'only', title: 'Only' }]\n\n## Ignored\n";
    let options = DocumentOptions {
        derive_from_headings: true,
        max_heading_level: 2,
    };
    let sections = parse(source, &options).unwrap();
    assert_eq!(sections, vec![Section::new("only", "Only")]);
}

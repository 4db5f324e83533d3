//! Explicit parsing of content files into structured documents.
//!
//! A page's navigation is declared as data inside the page itself:
//!
//! ```text
//! export const metadata = { title: 'Generics', description: '...' }
//! export const sections = [{ id: 'syntax', title: 'Syntax' }]
//! ```
//!
//! The source is parsed with tree-sitter to find fenced code (whose contents
//! are never read as exports) and headings. Export values are read with the
//! literal reader instead of being evaluated. When a page has no `sections`
//! export and heading derivation is enabled, sections come from its level-2
//! (and deeper, up to the configured limit) headings instead.

use crate::error::{ContentError, LiteralError};
use crate::formats::Format;
use crate::literal::parse_literal;
use crate::section::{first_duplicate_id, slugify, Section};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::Range;
use std::path::{Path, PathBuf};
use streaming_iterator::StreamingIterator;
use tracing::warn;
use tree_sitter::{Node, Parser, Query, QueryCursor, Tree};

/// Name of the export holding a page's section list.
pub const SECTIONS_EXPORT: &str = "sections";
/// Name of the export holding a page's metadata.
pub const METADATA_EXPORT: &str = "metadata";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Page-level metadata declared by a `metadata` export.
pub struct PageMetadata {
    /// Page title, fed through the site title template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Short page summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// A parsed content page.
pub struct ContentDocument {
    /// File the page was read from.
    pub source_path: PathBuf,
    /// Normalised page path (e.g. `/guides/setup`).
    pub page_path: String,
    /// Metadata export, if the page declares one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PageMetadata>,
    /// Sections in document order.
    pub sections: Vec<Section>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Controls how sections are obtained for pages without a `sections` export.
pub struct DocumentOptions {
    /// Derive sections from headings when no export is present.
    pub derive_from_headings: bool,
    /// Deepest heading level included in derived sections.
    pub max_heading_level: usize,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            derive_from_headings: false,
            max_heading_level: 2,
        }
    }
}

/// Parses one content page.
///
/// # Errors
///
/// Returns an error if the source cannot be parsed, the `sections` export is
/// not a readable literal or has the wrong shape, or section ids repeat. An
/// unreadable `metadata` export is logged and treated as absent.
pub fn parse_document(
    source_path: &Path,
    page_path: String,
    source: &str,
    format: &dyn Format,
    options: &DocumentOptions,
) -> Result<ContentDocument, ContentError> {
    let tree = syntax_tree(format, source, source_path)?;
    let code_ranges: Vec<Range<usize>> =
        captured_nodes(format, format.code_block_query(), &tree, source, source_path)?
            .iter()
            .map(Node::byte_range)
            .collect();

    let metadata = page_metadata(source_path, source, &code_ranges);

    let sections = match export_value(source_path, source, &code_ranges, SECTIONS_EXPORT)? {
        Some(value) => decode::<Vec<Section>>(source_path, SECTIONS_EXPORT, value)?,
        None if options.derive_from_headings => {
            heading_sections(format, &tree, source, source_path, options.max_heading_level)?
        }
        None => Vec::new(),
    };

    if let Some(id) = first_duplicate_id(&sections) {
        return Err(ContentError::DuplicateSection {
            path: source_path.to_path_buf(),
            id: id.to_string(),
        });
    }

    Ok(ContentDocument {
        source_path: source_path.to_path_buf(),
        page_path,
        metadata,
        sections,
    })
}

fn syntax_tree(format: &dyn Format, source: &str, path: &Path) -> Result<Tree, ContentError> {
    let parse_error = || ContentError::Parse {
        path: path.to_path_buf(),
    };
    let mut parser = Parser::new();
    parser
        .set_language(&format.language())
        .map_err(|_| parse_error())?;
    parser.parse(source, None).ok_or_else(parse_error)
}

fn captured_nodes<'t>(
    format: &dyn Format,
    query_source: &str,
    tree: &'t Tree,
    source: &str,
    path: &Path,
) -> Result<Vec<Node<'t>>, ContentError> {
    let query = Query::new(&format.language(), query_source).map_err(|_| ContentError::Parse {
        path: path.to_path_buf(),
    })?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());

    let mut nodes = Vec::new();
    while let Some(m) = matches.next() {
        nodes.extend(m.captures.iter().map(|capture| capture.node));
    }
    Ok(nodes)
}

/// Reads the `metadata` export. Metadata only decorates a page, so a value
/// that cannot be read is logged and dropped instead of failing the page.
fn page_metadata(
    path: &Path,
    source: &str,
    code_ranges: &[Range<usize>],
) -> Option<PageMetadata> {
    let read = export_value(path, source, code_ranges, METADATA_EXPORT).and_then(|value| {
        value
            .map(|value| decode::<PageMetadata>(path, METADATA_EXPORT, value))
            .transpose()
    });
    read.unwrap_or_else(|e| {
        warn!(error = %e, "ignoring page metadata");
        None
    })
}

/// Finds `export const|let|var <name> = <literal>` outside code blocks and
/// reads its value.
fn export_value(
    path: &Path,
    source: &str,
    code_ranges: &[Range<usize>],
    name: &str,
) -> Result<Option<Value>, ContentError> {
    let mut line_start = 0;

    for line in source.split_inclusive('\n') {
        let offset = line_start;
        line_start += line.len();

        if code_ranges.iter().any(|range| range.contains(&offset)) {
            continue;
        }
        let Some(rest) = declaration_value(line, name) else {
            continue;
        };

        let value_start = offset + (line.len() - rest.len());
        return parse_literal(&source[value_start..])
            .map(|(value, _)| Some(value))
            .map_err(|e| ContentError::Export {
                path: path.to_path_buf(),
                name: name.to_string(),
                source: LiteralError {
                    offset: value_start + e.offset,
                    message: e.message,
                },
            });
    }

    Ok(None)
}

/// Returns the text after `=` when `line` declares the export `name`.
fn declaration_value<'l>(line: &'l str, name: &str) -> Option<&'l str> {
    let rest = line.strip_prefix("export")?;
    let rest = strip_keyword(rest)?;
    let rest = ["const", "let", "var"]
        .iter()
        .find_map(|kw| rest.strip_prefix(kw))?;
    let rest = strip_keyword(rest)?;
    let rest = rest.strip_prefix(name)?.trim_start();
    rest.strip_prefix('=')
}

/// Requires and skips the whitespace that separates keywords.
fn strip_keyword(rest: &str) -> Option<&str> {
    let trimmed = rest.trim_start();
    (trimmed.len() < rest.len()).then_some(trimmed)
}

fn decode<T: serde::de::DeserializeOwned>(
    path: &Path,
    name: &str,
    value: Value,
) -> Result<T, ContentError> {
    serde_json::from_value(value).map_err(|source| ContentError::Shape {
        path: path.to_path_buf(),
        name: name.to_string(),
        source,
    })
}

fn heading_sections(
    format: &dyn Format,
    tree: &Tree,
    source: &str,
    path: &Path,
    max_level: usize,
) -> Result<Vec<Section>, ContentError> {
    let bytes = source.as_bytes();
    let mut sections = Vec::new();

    for node in captured_nodes(format, format.heading_query(), tree, source, path)? {
        let mut cursor = node.walk();
        let mut level = None;
        let mut text = None;

        for child in node.children(&mut cursor) {
            let kind = child.kind();
            if let Some(n) = kind
                .strip_prefix("atx_h")
                .and_then(|rest| rest.strip_suffix("_marker"))
                .and_then(|digit| digit.parse::<usize>().ok())
            {
                level = Some(n);
            } else if kind == "inline" {
                text = child.utf8_text(bytes).ok();
            }
        }

        let (Some(level), Some(text)) = (level, text) else {
            continue;
        };
        if !(2..=max_level).contains(&level) {
            continue;
        }
        if let Some(section) = heading_section(text.trim(), level) {
            sections.push(section);
        }
    }

    Ok(sections)
}

/// Builds a section from heading text, honouring a trailing
/// `{{ id: '...', tag: '...' }}` annotation.
fn heading_section(text: &str, level: usize) -> Option<Section> {
    let (title, attributes) = split_annotation(text);
    let attribute = |key: &str| {
        attributes
            .as_ref()
            .and_then(|attrs| attrs.get(key))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    let id = attribute("id").unwrap_or_else(|| slugify(title));
    if id.is_empty() {
        return None;
    }

    Some(Section {
        id,
        title: title.to_string(),
        tag: attribute("tag"),
        level: Some(level),
    })
}

fn split_annotation(text: &str) -> (&str, Option<serde_json::Map<String, Value>>) {
    let Some(open) = text.rfind("{{") else {
        return (text, None);
    };
    let Some(inner) = text[open + 1..].strip_suffix('}') else {
        return (text, None);
    };
    match parse_literal(inner) {
        Ok((Value::Object(map), consumed)) if inner[consumed..].trim().is_empty() => {
            (text[..open].trim_end(), Some(map))
        }
        _ => (text, None),
    }
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;

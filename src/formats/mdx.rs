//! MDX format implementation using tree-sitter-md.
//!
//! MDX is markdown with ES module statements and JSX mixed in. The block
//! grammar of tree-sitter-md reads the module statements as paragraphs, which
//! is enough to find headings and fenced code without a JavaScript parser.

use crate::formats::Format;

/// Tree-sitter queries for MDX pages (ATX headings and fenced code).
pub struct MdxFormat;

impl Format for MdxFormat {
    fn file_extension(&self) -> &'static str {
        "mdx"
    }

    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn heading_query(&self) -> &'static str {
        "(atx_heading) @heading"
    }

    fn code_block_query(&self) -> &'static str {
        "[(fenced_code_block) (indented_code_block)] @code"
    }
}

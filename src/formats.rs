//! Format trait and implementations for different content file types.
//!
//! This module defines the `Format` trait which abstracts over content
//! formats by providing the tree-sitter grammar and the queries needed to
//! locate headings and the code blocks whose contents must never be read as
//! page exports.

pub mod mdx;

/// Grammar and queries for one kind of content file.
pub trait Format {
    /// File suffix (without the dot) this format handles.
    fn file_extension(&self) -> &'static str;
    /// Grammar used to parse the file.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing each heading node as `@heading`.
    fn heading_query(&self) -> &str;
    /// Query capturing each fenced code block as `@code`.
    fn code_block_query(&self) -> &str;
}

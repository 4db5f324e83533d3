//! Content discovery: from a content root to the page section index.
//!
//! Every matched file is loaded concurrently on the current task; the
//! registry is only assembled once all loads have finished, and a single
//! file that fails to load fails the whole discovery. Keys are page paths,
//! so two files deriving the same path is rejected rather than letting one
//! silently shadow the other.

use crate::config::Config;
use crate::document::{ContentDocument, DocumentOptions};
use crate::error::ContentError;
use crate::formats::mdx::MdxFormat;
use crate::formats::Format;
use crate::input::{find_documents, load_document};
use crate::section::Section;
use futures::future::try_join_all;
use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// Page path to its sections, in document order.
pub type PageSectionIndex = BTreeMap<String, Vec<Section>>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
/// Every discovered page, keyed by page path.
pub struct ContentRegistry {
    documents: BTreeMap<String, ContentDocument>,
}

/// What to scan and how to read it.
pub struct Discovery<'a> {
    /// Directory containing the content pages.
    pub root: &'a Path,
    /// File suffixes that count as pages.
    pub extensions: &'a [String],
    /// File stems that stand for their directory.
    pub index_stems: &'a [String],
    /// Per-page parsing options.
    pub options: DocumentOptions,
    /// Grammar and queries for the pages.
    pub format: &'a dyn Format,
}

impl<'a> Discovery<'a> {
    #[must_use]
    /// Discovery settings taken from configuration, reading pages as MDX.
    pub fn from_config(config: &'a Config, root: &'a Path) -> Self {
        Self {
            root,
            extensions: &config.file_extensions,
            index_stems: &config.index_stems,
            options: config.document_options(),
            format: &MdxFormat,
        }
    }
}

impl ContentRegistry {
    /// Scans the content root and loads every page.
    ///
    /// Zero matching files (including a missing root) yields an empty
    /// registry.
    ///
    /// # Errors
    ///
    /// Returns the first failure from any page, or
    /// [`ContentError::DuplicatePage`] if two files derive the same path.
    pub async fn discover(discovery: &Discovery<'_>) -> Result<Self, ContentError> {
        if !discovery.root.is_dir() {
            warn!(root = %discovery.root.display(), "content root does not exist");
        }

        let files = find_documents(discovery.root, discovery.extensions, discovery.format)?;
        let loads = files.iter().map(|path| {
            load_document(
                discovery.root,
                path,
                discovery.index_stems,
                discovery.format,
                &discovery.options,
            )
        });
        let documents = try_join_all(loads).await?;

        let registry = Self::from_documents(documents)?;
        info!(pages = registry.len(), "built section index");
        Ok(registry)
    }

    /// Assembles a registry from already parsed documents.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::DuplicatePage`] if two documents share a page
    /// path.
    pub fn from_documents(
        documents: impl IntoIterator<Item = ContentDocument>,
    ) -> Result<Self, ContentError> {
        let mut map = BTreeMap::new();

        for doc in documents {
            match map.entry(doc.page_path.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(doc);
                }
                Entry::Occupied(existing) => {
                    return Err(ContentError::DuplicatePage {
                        page: doc.page_path,
                        first: existing.get().source_path.clone(),
                        second: doc.source_path,
                    });
                }
            }
        }

        Ok(Self { documents: map })
    }

    #[must_use]
    /// Number of pages.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    /// Whether no pages were found.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    #[must_use]
    /// Looks up a page by its path.
    pub fn get(&self, page_path: &str) -> Option<&ContentDocument> {
        self.documents.get(page_path)
    }

    /// Iterates pages in page path order.
    pub fn documents(&self) -> impl Iterator<Item = &ContentDocument> {
        self.documents.values()
    }

    #[must_use]
    /// The page path to sections mapping handed to the layout.
    pub fn section_index(&self) -> PageSectionIndex {
        self.documents
            .iter()
            .map(|(path, doc)| (path.clone(), doc.sections.clone()))
            .collect()
    }
}

/// Scans `config`'s content root and returns the page section index.
///
/// # Errors
///
/// Returns an error if any content page fails to load.
pub async fn build_section_index(config: &Config) -> Result<PageSectionIndex, ContentError> {
    let root = config.content_root();
    let registry = ContentRegistry::discover(&Discovery::from_config(config, &root)).await?;
    Ok(registry.section_index())
}

#[cfg(test)]
#[path = "tests/registry.rs"]
mod tests;

//! Locating content files and turning each into a document.
//!
//! Pages are found by globbing the content root for every configured
//! extension at any depth. Each page's key is derived from its path relative
//! to the root, so the same file always maps to the same page path.

use crate::document::{parse_document, ContentDocument, DocumentOptions};
use crate::error::ContentError;
use crate::formats::Format;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};

/// Finds content files under `root` with any of `extensions`, at any depth.
///
/// Falls back to the format's own extension when `extensions` is empty.
/// Returns the matches sorted and de-duplicated; a root that does not exist
/// simply matches nothing. Dot-files and anything below a dot-directory
/// are skipped.
///
/// # Errors
///
/// Returns an error if a glob pattern is invalid or a match cannot be read.
pub fn find_documents(
    root: &Path,
    extensions: &[String],
    format: &dyn Format,
) -> Result<Vec<PathBuf>, ContentError> {
    let fallback = [format.file_extension().to_string()];
    let extensions = if extensions.is_empty() {
        &fallback[..]
    } else {
        extensions
    };

    let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
    // Hidden files and directories are never pages.
    let options = glob::MatchOptions {
        require_literal_leading_dot: true,
        ..glob::MatchOptions::new()
    };
    let mut documents = Vec::new();

    for ext in extensions {
        let pattern = format!("{escaped_root}/**/*.{}", glob::Pattern::escape(ext));
        trace!(%pattern, "globbing content");

        let paths =
            glob::glob_with(&pattern, options).map_err(|e| ContentError::Glob(e.to_string()))?;
        for entry in paths {
            let path = entry.map_err(|e| ContentError::Glob(e.to_string()))?;
            if path.is_file() {
                documents.push(path);
            }
        }
    }

    documents.sort();
    documents.dedup();
    debug!(root = %root.display(), count = documents.len(), "found content files");
    Ok(documents)
}

/// Derives the page path for a content file relative to the content root.
///
/// The extension is stripped, a trailing index stem (e.g. `page`) is dropped
/// so the file stands for its directory, and the segments are joined with `/`
/// behind a leading `/`. `guides/setup/page.mdx` becomes `/guides/setup` and
/// a root `page.mdx` becomes `/`.
#[must_use]
pub fn derive_page_path(relative: &Path, index_stems: &[String]) -> String {
    let mut segments: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if let Some(file_name) = segments.pop() {
        let stem = Path::new(&file_name)
            .file_stem()
            .map_or_else(|| file_name.clone(), |s| s.to_string_lossy().into_owned());
        if !index_stems.iter().any(|index| *index == stem) {
            segments.push(stem);
        }
    }

    format!("/{}", segments.join("/"))
}

/// Reads and parses one content file.
///
/// # Errors
///
/// Returns an error if the file cannot be read as UTF-8 text or does not
/// parse into a document.
pub async fn load_document(
    root: &Path,
    path: &Path,
    index_stems: &[String],
    format: &dyn Format,
    options: &DocumentOptions,
) -> Result<ContentDocument, ContentError> {
    let page_path = derive_page_path(&relative_to(root, path), index_stems);
    debug!(path = %path.display(), page = %page_path, "loading content file");

    let source = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    parse_document(path, page_path, &source, format, options)
}

/// Strips `root` from `path`, ignoring `.` components on either side.
fn relative_to(root: &Path, path: &Path) -> PathBuf {
    let clean = |p: &Path| -> PathBuf {
        p.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    };
    let (root, path) = (clean(root), clean(path));
    path.strip_prefix(&root)
        .map_or_else(|_| path.clone(), Path::to_path_buf)
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;

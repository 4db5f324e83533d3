//! Configuration to acknowledge site preferences as well as set defaults.
//!
//! Specifically, we try to find a docsmap.toml, and if present we load settings from there.
//! This provides the content root, which files count as pages, how page paths are derived,
//! how page titles are templated and where remote posts are fetched from.

use crate::document::DocumentOptions;
use crate::error::ConfigError;
use facet::Facet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "docsmap.toml";

#[derive(Facet, Clone, Debug)]
/// Site preferences loaded from docsmap.toml or falling back to defaults.
pub struct Config {
    #[facet(default = "src/app".to_string())]
    /// Directory scanned for content pages.
    pub content_root: String,
    #[facet(default = vec!["mdx".to_string()])]
    /// File suffixes that count as content pages.
    pub file_extensions: Vec<String>,
    #[facet(default = vec!["page".to_string(), "index".to_string()])]
    /// File stems that stand for their directory (`guides/page.mdx` is `/guides`).
    pub index_stems: Vec<String>,
    #[facet(default = false)]
    /// Derive sections from headings for pages without a `sections` export.
    pub derive_from_headings: bool,
    #[facet(default = 2)]
    /// Deepest heading level used when deriving sections.
    pub max_heading_level: usize,
    #[facet(default = "%s - TypeScript".to_string())]
    /// Page title template; `%s` is replaced by the page title.
    pub title_template: String,
    #[facet(default = "TypeScript Masterclass".to_string())]
    /// Title used for pages that declare none.
    pub default_title: String,
    #[facet(default = "https://jsonplaceholder.typicode.com/posts".to_string())]
    /// Endpoint queried for posts.
    pub posts_url: String,
}

impl Config {
    /// Load configuration from `path`, or from docsmap.toml if present.
    ///
    /// An explicit path must exist; the implicit docsmap.toml may be absent,
    /// but if it exists it must be readable.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file cannot be read, or if any file
    /// that is read does not parse.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, contents) = match path {
            Some(path) => {
                let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                (path.to_path_buf(), contents)
            }
            None => Self::read_implicit(Path::new(CONFIG_FILE))?,
        };

        Self::from_toml(&contents).map_err(|message| ConfigError::Parse { path, message })
    }

    /// Reads the implicit config file; only a missing file falls back to defaults.
    fn read_implicit(path: &Path) -> Result<(PathBuf, String), ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok((path.to_path_buf(), contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok((path.to_path_buf(), String::new())),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parse configuration from TOML text, filling unset fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns the parser message if the text is not valid for this schema.
    pub fn from_toml(contents: &str) -> Result<Self, String> {
        facet_toml::from_str::<Self>(contents).map_err(|e| e.to_string())
    }

    #[must_use]
    /// The content root as a path.
    pub fn content_root(&self) -> PathBuf {
        PathBuf::from(&self.content_root)
    }

    #[must_use]
    /// Options controlling how each page's sections are obtained.
    pub fn document_options(&self) -> DocumentOptions {
        DocumentOptions {
            derive_from_headings: self.derive_from_headings,
            max_heading_level: self.max_heading_level,
        }
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;

//! The context handed to the layout shell.
//!
//! Navigation data is computed once at startup and then only read. Instead
//! of living in process-wide state, it is gathered into a [`LayoutContext`]
//! that the caller constructs and passes down to whatever renders pages.

use crate::config::Config;
use crate::error::ContentError;
use crate::registry::{ContentRegistry, Discovery, PageSectionIndex};
use crate::section::Section;
use serde::Serialize;

/// Root font size assumed when none has been measured.
pub const DEFAULT_ROOT_FONT_SIZE_PX: f64 = 16.0;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Site-wide title settings.
pub struct SiteMetadata {
    /// Template applied to page titles; `%s` is replaced by the page title.
    pub title_template: String,
    /// Title used when a page declares none.
    pub default_title: String,
}

impl SiteMetadata {
    #[must_use]
    /// Applies the title template, or falls back to the default title.
    pub fn page_title(&self, title: Option<&str>) -> String {
        match title {
            Some(title) if !title.trim().is_empty() => self.title_template.replace("%s", title),
            _ => self.default_title.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Everything the layout needs to render navigation for any page.
pub struct LayoutContext {
    /// Site-wide title settings.
    pub metadata: SiteMetadata,
    /// Page path to ordered sections.
    pub all_sections: PageSectionIndex,
    #[serde(skip)]
    registry: ContentRegistry,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// The resolved view of a single page.
pub struct PageView<'a> {
    /// Page path.
    pub path: &'a str,
    /// Fully templated title.
    pub title: String,
    /// Page description, if declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    /// In-page navigation.
    pub sections: &'a [Section],
}

impl LayoutContext {
    #[must_use]
    /// Builds the context from a registry that has already been discovered.
    pub fn new(metadata: SiteMetadata, registry: ContentRegistry) -> Self {
        Self {
            metadata,
            all_sections: registry.section_index(),
            registry,
        }
    }

    /// Discovers content under the configured root and builds the context.
    ///
    /// # Errors
    ///
    /// Returns an error if any content page fails to load.
    pub async fn build(config: &Config) -> Result<Self, ContentError> {
        let root = config.content_root();
        let registry = ContentRegistry::discover(&Discovery::from_config(config, &root)).await?;
        Ok(Self::new(
            SiteMetadata {
                title_template: config.title_template.clone(),
                default_title: config.default_title.clone(),
            },
            registry,
        ))
    }

    #[must_use]
    /// Sections for `page_path`; unknown pages have none.
    pub fn sections_for(&self, page_path: &str) -> &[Section] {
        self.all_sections
            .get(page_path)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[must_use]
    /// Resolves title, description and sections for a known page.
    pub fn page(&self, page_path: &str) -> Option<PageView<'_>> {
        let doc = self.registry.get(page_path)?;
        let metadata = doc.metadata.as_ref();
        Some(PageView {
            path: &doc.page_path,
            title: self
                .metadata
                .page_title(metadata.and_then(|m| m.title.as_deref())),
            description: metadata.and_then(|m| m.description.as_deref()),
            sections: self.sections_for(page_path),
        })
    }

    /// Like [`LayoutContext::page`], but a missing page is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::UnknownPage`] if no content file maps to
    /// `page_path`.
    pub fn require_page(&self, page_path: &str) -> Result<PageView<'_>, ContentError> {
        self.page(page_path).ok_or_else(|| ContentError::UnknownPage {
            page: page_path.to_string(),
        })
    }
}

#[must_use]
/// Converts a length in rem to pixels.
///
/// Uses `root_font_size_px` when known, otherwise 16px.
pub fn rem_to_px(rem: f64, root_font_size_px: Option<f64>) -> f64 {
    rem * root_font_size_px.unwrap_or(DEFAULT_ROOT_FONT_SIZE_PX)
}

#[cfg(test)]
#[path = "tests/layout.rs"]
mod tests;

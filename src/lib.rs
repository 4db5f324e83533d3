//! docsmap: section index discovery and typed request wrappers for documentation sites.
//!
//! Content pages are scanned and parsed into a page path to sections index
//! for the layout shell, and remote endpoints are called through a uniform
//! request wrapper.

pub mod config;
pub mod document;
pub mod error;
pub mod formats;
pub mod input;
pub mod layout;
pub mod literal;
pub mod logging;
pub mod posts;
pub mod registry;
pub mod request;
pub mod section;

pub use error::{ContentError, Error, RequestError};
pub use layout::LayoutContext;
pub use registry::{build_section_index, ContentRegistry, PageSectionIndex};
pub use request::{request_handler, ApiResponse, RequestHandler};
pub use section::Section;

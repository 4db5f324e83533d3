//! Error types for content discovery, remote requests and configuration.
//!
//! Discovery errors are fatal to index construction; request errors are
//! handed back to the caller untouched.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes used by the CLI.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// General error.
    pub const ERROR: i32 = 1;
    /// Configuration could not be read or parsed.
    pub const CONFIG_ERROR: i32 = 2;
    /// A content file could not be loaded into the index.
    pub const CONTENT_ERROR: i32 = 3;
    /// A remote request failed.
    pub const REQUEST_ERROR: i32 = 4;
}

/// Top-level error aggregating every failure the crate can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Content discovery error.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// Remote request error.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Output serialisation error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Maps this error onto the CLI exit code.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => ExitCode::CONFIG_ERROR,
            Self::Content(_) => ExitCode::CONTENT_ERROR,
            Self::Json(_) => ExitCode::ERROR,
            Self::Request(_) => ExitCode::REQUEST_ERROR,
        }
    }
}

/// A content file that could not be turned into a document.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The file could not be read (missing, unreadable, not UTF-8).
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The content glob was invalid or a match could not be inspected.
    #[error("failed to scan content: {0}")]
    Glob(String),

    /// tree-sitter could not produce a syntax tree.
    #[error("failed to parse {}", .path.display())]
    Parse {
        /// File being parsed.
        path: PathBuf,
    },

    /// An export statement whose value is not a readable literal.
    #[error("malformed `{name}` export in {}: {source}", .path.display())]
    Export {
        /// File containing the export.
        path: PathBuf,
        /// Exported binding name.
        name: String,
        /// Literal reader failure.
        #[source]
        source: LiteralError,
    },

    /// An export whose literal does not have the expected structure.
    #[error("unexpected shape for `{name}` export in {}: {source}", .path.display())]
    Shape {
        /// File containing the export.
        path: PathBuf,
        /// Exported binding name.
        name: String,
        /// Deserialisation failure.
        #[source]
        source: serde_json::Error,
    },

    /// Two sections in one page share an id.
    #[error("duplicate section id `{id}` in {}", .path.display())]
    DuplicateSection {
        /// File containing the duplicates.
        path: PathBuf,
        /// Repeated identifier.
        id: String,
    },

    /// No content file derives the requested page path.
    #[error("no page at `{page}`")]
    UnknownPage {
        /// Requested page path.
        page: String,
    },

    /// Two content files derive the same page path.
    #[error("page `{page}` is defined by both {} and {}", .first.display(), .second.display())]
    DuplicatePage {
        /// Derived page path.
        page: String,
        /// File that claimed the path first.
        first: PathBuf,
        /// File that collided with it.
        second: PathBuf,
    },
}

/// Failure reading a JavaScript literal, with the byte offset it occurred at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at byte {offset}")]
pub struct LiteralError {
    /// Byte offset into the literal source.
    pub offset: usize,
    /// What the reader expected or found.
    pub message: String,
}

/// A failed remote request, passed through to the caller uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Response status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The caller cancelled the request before it completed.
    #[error("request cancelled")]
    Cancelled,
}

/// Configuration file problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        /// Configuration path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("invalid config {}: {message}", .path.display())]
    Parse {
        /// Configuration path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}

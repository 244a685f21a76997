//! Typed error handling for deadstyle.
//!
//! Provides structured errors that library consumers can match on. Page
//! retrieval failures are the only recoverable class: the engine logs them
//! and skips the page. Everything else aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// Retrieval failures raised by a page source resolver.
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// The location does not exist (missing file, or nothing serving it).
    #[error("{location} was not found")]
    NotFound { location: String },

    /// An HTTP-level failure: transport error, or a non-success status from
    /// a one-shot fetch.
    #[error("retrieving {location} raised an HTTP error: {message}")]
    Http { location: String, message: String },

    /// The browsing agent received a non-success response code.
    #[error("{location} returned a response code of {code}")]
    ResponseCode { location: String, code: u16 },
}

impl RetrievalError {
    /// The location that failed to resolve.
    pub fn location(&self) -> &str {
        match self {
            Self::NotFound { location } => location,
            Self::Http { location, .. } => location,
            Self::ResponseCode { location, .. } => location,
        }
    }
}

/// Main error type for deadstyle operations.
#[derive(Error, Debug)]
pub enum DeadstyleError {
    /// A page could not be retrieved. The engine recovers locally: the page
    /// is skipped and the run continues.
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    /// A stylesheet source could not be retrieved. Fatal: without it the
    /// candidate set would be incomplete.
    #[error("failed to retrieve stylesheet {location}: {source}")]
    StylesheetFetch {
        location: String,
        #[source]
        source: RetrievalError,
    },

    /// A stylesheet source could not be parsed.
    #[error("failed to parse stylesheet {location}: {message}")]
    StylesheetParse { location: String, message: String },

    /// A stripped selector was rejected by the DOM query engine.
    #[error("selector `{selector}` was rejected by the query engine: {message}")]
    Selector { selector: String, message: String },

    /// Browsing-agent retrieval was requested, but this build does not
    /// include the `agent` feature.
    #[error("browsing-agent retrieval requested, but this build lacks the `agent` feature")]
    AgentUnavailable,

    /// The configured ignore pattern is not a valid regex.
    #[error("invalid ignore pattern `{pattern}`: {message}")]
    IgnorePattern { pattern: String, message: String },

    /// A page script failed outside of retrieval.
    #[error("page script failed: {message}")]
    Script { message: String },

    /// I/O error outside of page retrieval (readers, local files).
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl DeadstyleError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a fatal stylesheet retrieval error.
    pub fn stylesheet_fetch(location: impl Into<String>, source: RetrievalError) -> Self {
        Self::StylesheetFetch {
            location: location.into(),
            source,
        }
    }

    /// Create a stylesheet parse error.
    pub fn stylesheet_parse(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StylesheetParse {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create a query-engine rejection error.
    pub fn selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Create an ignore-pattern error.
    pub fn ignore_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::IgnorePattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create a page-script error.
    pub fn script(message: impl Into<String>) -> Self {
        Self::Script {
            message: message.into(),
        }
    }

    /// Check if this error is recovered locally by the engine (page skipped,
    /// run continues).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Retrieval(_))
    }
}

/// Convenience type alias for deadstyle results.
pub type DeadstyleResult<T> = Result<T, DeadstyleError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> DeadstyleResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> DeadstyleResult<T> {
        self.map_err(|e| DeadstyleError::io(path, e))
    }
}

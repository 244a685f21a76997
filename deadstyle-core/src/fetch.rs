//! Page source resolution: locations to text.
//!
//! A location already carrying a scheme is used as-is; anything else is the
//! configured root concatenated with the location. Resolved `http(s)`
//! locations are fetched over HTTP, everything else is read from the
//! filesystem.

use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::sync::OnceLock;
use tracing::info;

use crate::error::{DeadstyleResult, RetrievalError};

/// Retrieval strategy selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// One-shot fetches with no state between them.
    #[default]
    Plain,
    /// Shared stateful browsing agent (cookies, current document).
    Agent,
}

/// "Get me the text for this location": the interface the elimination
/// engine consumes for stylesheets and pages alike.
pub trait PageResolver {
    /// Resolves `location` against the configured root and returns its text.
    fn fetch(&mut self, location: &str) -> Result<String, RetrievalError>;

    /// The last document retrieved, if this resolver retains one. Stateless
    /// resolvers answer `None`.
    fn current_document(&self) -> Option<&str> {
        None
    }
}

/// Selects the retrieval strategy for the configured mode.
pub fn resolver_for(mode: FetchMode, root: &str) -> DeadstyleResult<Box<dyn PageResolver>> {
    match mode {
        FetchMode::Plain => Ok(Box::new(PlainResolver::new(root))),
        #[cfg(feature = "agent")]
        FetchMode::Agent => Ok(Box::new(crate::agent::AgentResolver::new(root))),
        #[cfg(not(feature = "agent"))]
        FetchMode::Agent => Err(crate::error::DeadstyleError::AgentUnavailable),
    }
}

/// True when the location already carries a scheme (`http://`, `file://`).
pub(crate) fn is_absolute_location(location: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^\w+://").expect("scheme pattern compiles"))
        .is_match(location)
}

/// Resolves a location against the root prefix unless it is already
/// absolute.
pub(crate) fn resolve_location(root: &str, location: &str) -> String {
    if is_absolute_location(location) {
        location.to_string()
    } else {
        format!("{root}{location}")
    }
}

pub(crate) fn is_http(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Reads a non-HTTP location from the filesystem.
pub(crate) fn read_local(location: &str) -> Result<String, RetrievalError> {
    let path = location.strip_prefix("file://").unwrap_or(location);
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => RetrievalError::NotFound {
            location: location.to_string(),
        },
        _ => RetrievalError::Http {
            location: location.to_string(),
            message: e.to_string(),
        },
    })
}

/// Stateless resolver: HTTP GET for `http(s)` locations, filesystem read
/// otherwise. Keeps no current document.
pub struct PlainResolver {
    root: String,
}

impl PlainResolver {
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }
}

impl PageResolver for PlainResolver {
    fn fetch(&mut self, location: &str) -> Result<String, RetrievalError> {
        let location = resolve_location(&self.root, location);
        info!(location = %location, "fetching");

        if is_http(&location) {
            http_get(&location)
        } else {
            read_local(&location)
        }
    }
}

fn http_get(location: &str) -> Result<String, RetrievalError> {
    let response = ureq::get(location).call().map_err(|e| match e {
        ureq::Error::Status(code, response) => RetrievalError::Http {
            location: location.to_string(),
            message: format!("{} {}", code, response.status_text()),
        },
        ureq::Error::Transport(transport) => RetrievalError::Http {
            location: location.to_string(),
            message: transport.to_string(),
        },
    })?;

    response.into_string().map_err(|e| RetrievalError::Http {
        location: location.to_string(),
        message: e.to_string(),
    })
}

//! Stateful browsing-agent retrieval.
//!
//! Wraps a shared [`ureq::Agent`]: cookies set by one response are replayed
//! on later requests, redirects are followed and reported, and the last
//! fetched body is retained as the current document for page scripts. Gated
//! behind the `agent` feature; [`crate::fetch::resolver_for`] reports
//! `AgentUnavailable` when the feature is absent.

use tracing::{info, warn};

use crate::error::RetrievalError;
use crate::fetch::{is_http, read_local, resolve_location, PageResolver};

/// Resolver backed by a persistent browsing agent.
pub struct AgentResolver {
    root: String,
    agent: ureq::Agent,
    current: Option<String>,
}

impl AgentResolver {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            agent: ureq::AgentBuilder::new().redirects(8).build(),
            current: None,
        }
    }
}

impl PageResolver for AgentResolver {
    fn fetch(&mut self, location: &str) -> Result<String, RetrievalError> {
        let location = resolve_location(&self.root, location);
        info!(location = %location, "fetching (agent)");

        let body = if is_http(&location) {
            let response = self.agent.get(&location).call().map_err(|e| match e {
                ureq::Error::Status(code, _) => RetrievalError::ResponseCode {
                    location: location.clone(),
                    code,
                },
                ureq::Error::Transport(transport) => RetrievalError::Http {
                    location: location.clone(),
                    message: transport.to_string(),
                },
            })?;

            // A resolved location differing from the requested one is a
            // warning, not an error.
            let resolved = response.get_url().to_string();
            if resolved != location {
                warn!(requested = %location, resolved = %resolved, "redirected");
            }

            response.into_string().map_err(|e| RetrievalError::Http {
                location: location.clone(),
                message: e.to_string(),
            })?
        } else {
            read_local(&location)?
        };

        self.current = Some(body.clone());
        Ok(body)
    }

    fn current_document(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn create_temp_dir() -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir()
            .join("deadstyle_agent_test")
            .join(format!("{}_{}", std::process::id(), id));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_agent_retains_current_document() {
        let dir = create_temp_dir();
        fs::write(dir.join("a.html"), "<p>a</p>").unwrap();
        fs::write(dir.join("b.html"), "<p>b</p>").unwrap();

        let mut resolver = AgentResolver::new(dir.to_string_lossy().to_string());
        assert!(resolver.current_document().is_none());

        resolver.fetch("/a.html").unwrap();
        assert_eq!(resolver.current_document(), Some("<p>a</p>"));

        resolver.fetch("/b.html").unwrap();
        assert_eq!(resolver.current_document(), Some("<p>b</p>"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_failed_fetch_keeps_previous_document() {
        let dir = create_temp_dir();
        fs::write(dir.join("a.html"), "<p>a</p>").unwrap();

        let mut resolver = AgentResolver::new(dir.to_string_lossy().to_string());
        resolver.fetch("/a.html").unwrap();

        let err = resolver.fetch("/missing.html").unwrap_err();
        assert!(matches!(err, RetrievalError::NotFound { .. }));
        assert_eq!(resolver.current_document(), Some("<p>a</p>"));

        fs::remove_dir_all(&dir).ok();
    }
}

//! Run configuration: the immutable struct handed to the engine, plus
//! optional `deadstyle.toml` loading.

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::{DeadstyleError, DeadstyleResult};
use crate::fetch::FetchMode;
use crate::page::PageDescriptor;

/// Root prefix used when none is configured.
pub const DEFAULT_ROOT: &str = "http://localhost:3000";

/// Immutable configuration for one elimination run.
///
/// Construct it up front and hand it to [`crate::engine::run`]; nothing
/// here is mutated during the run.
#[derive(Debug)]
pub struct RunConfig {
    /// Prefix prepended to non-absolute stylesheet and page locations.
    pub root: String,
    /// Stylesheet locations, fetched in order.
    pub stylesheets: Vec<String>,
    /// Inline rule block, parsed after all stylesheet sources.
    pub rules: String,
    /// Pages to analyze, in order.
    pub pages: Vec<PageDescriptor>,
    /// Selectors matching this pattern never enter the candidate set.
    pub ignore: Option<Regex>,
    /// Retrieval strategy.
    pub mode: FetchMode,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            root: DEFAULT_ROOT.to_string(),
            stylesheets: Vec::new(),
            rules: String::new(),
            pages: Vec::new(),
            ignore: None,
            mode: FetchMode::Plain,
        }
    }
}

impl RunConfig {
    /// Compiles `pattern` as the ignore filter.
    pub fn with_ignore_pattern(mut self, pattern: &str) -> DeadstyleResult<Self> {
        let compiled = Regex::new(pattern)
            .map_err(|e| DeadstyleError::ignore_pattern(pattern, e.to_string()))?;
        self.ignore = Some(compiled);
        Ok(self)
    }
}

/// File-based configuration (`deadstyle.toml`).
#[derive(Debug, Deserialize, Default)]
pub struct DeadstyleConfig {
    /// Root prefix for non-absolute locations (URL or directory).
    pub root: Option<String>,
    /// Stylesheet locations.
    pub stylesheets: Option<Vec<String>>,
    /// Page locations.
    pub pages: Option<Vec<String>>,
    /// Inline rule block.
    pub rules: Option<String>,
    /// Ignore pattern applied to selector text.
    pub ignore: Option<String>,
    /// Retrieve through the stateful browsing agent.
    pub agent: Option<bool>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Output format configuration.
#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    /// Output format: "plain" or "json".
    pub format: Option<String>,
}

/// Loads configuration from deadstyle.toml if it exists.
pub fn load_config(root: &Path) -> Result<Option<DeadstyleConfig>> {
    let path = root.join("deadstyle.toml");
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)?;
    let cfg = toml::from_str(&content).context("Invalid deadstyle.toml")?;
    Ok(Some(cfg))
}

impl DeadstyleConfig {
    /// Converts file values into a run configuration; page locations become
    /// [`PageDescriptor::Location`] entries.
    pub fn into_run_config(self) -> DeadstyleResult<RunConfig> {
        let mut config = RunConfig {
            root: self.root.unwrap_or_else(|| DEFAULT_ROOT.to_string()),
            stylesheets: self.stylesheets.unwrap_or_default(),
            rules: self.rules.unwrap_or_default(),
            pages: self
                .pages
                .unwrap_or_default()
                .into_iter()
                .map(PageDescriptor::Location)
                .collect(),
            ignore: None,
            mode: if self.agent.unwrap_or(false) {
                FetchMode::Agent
            } else {
                FetchMode::Plain
            },
        };
        if let Some(pattern) = self.ignore {
            config = config.with_ignore_pattern(&pattern)?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.root, DEFAULT_ROOT);
        assert_eq!(config.mode, FetchMode::Plain);
        assert!(config.ignore.is_none());
    }

    #[test]
    fn test_invalid_ignore_pattern() {
        let err = RunConfig::default()
            .with_ignore_pattern("[unclosed")
            .unwrap_err();
        assert!(matches!(err, DeadstyleError::IgnorePattern { .. }));
    }

    #[test]
    fn test_file_config_into_run_config() {
        let file: DeadstyleConfig = toml::from_str(
            r#"
            root = "public"
            stylesheets = ["/css/site.css"]
            pages = ["/index.html", "/about.html"]
            ignore = "^#admin"
            agent = false

            [output]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(file.output.as_ref().unwrap().format.as_deref(), Some("json"));

        let config = file.into_run_config().unwrap();
        assert_eq!(config.root, "public");
        assert_eq!(config.stylesheets, vec!["/css/site.css"]);
        assert_eq!(config.pages.len(), 2);
        assert_eq!(config.pages[0].label(), "/index.html");
        assert!(config.ignore.unwrap().is_match("#admin-panel"));
        assert_eq!(config.mode, FetchMode::Plain);
    }
}

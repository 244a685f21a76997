//! deadstyle-core: dead CSS selector detection library
//!
//! Finds selectors declared in a set of stylesheets that no element matches
//! across a set of HTML pages, so the rules behind them can be pruned.
//!
//! The run is a monotonic elimination: all selectors start out presumed
//! unused, pseudo-class variants whose base form is also a candidate are
//! folded away, and then each page in turn removes the selectors it
//! matches. Whatever survives every page is the report.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use deadstyle_core::prelude::*;
//!
//! let config = RunConfig {
//!     root: "public".into(),
//!     stylesheets: vec!["/css/site.css".into()],
//!     pages: vec![PageDescriptor::Location("/index.html".into())],
//!     ..RunConfig::default()
//! };
//!
//! let report = deadstyle_core::run(config)?;
//! for selector in &report.unused_selectors {
//!     println!("{}", selector);
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`selectors`]: Candidate set and pseudo-class text handling
//! - [`stylesheet`]: CSS text to per-selector rules (LightningCSS)
//! - [`collect`]: Ordered, de-duplicated selector aggregation
//! - [`reduce`]: Pseudo-class variant reduction
//! - [`matcher`]: Per-page matching through the DOM query engine
//! - [`engine`]: The elimination loop and the final report
//! - [`page`]: Page descriptors (inline HTML, reader, script, location)
//! - [`fetch`]: Page source resolution (filesystem + HTTP)
//! - [`agent`]: Stateful browsing-agent retrieval (feature `agent`)
//! - [`scan`]: Stylesheet discovery on a local directory tree
//! - [`config`]: Run configuration and `deadstyle.toml` loading
//! - [`error`]: Typed error handling
//! - [`report`]: Plain and JSON output
//!
//! # Cargo Features
//!
//! - `agent` (default): Stateful browsing-agent retrieval with a cookie
//!   store; without it, requesting agent mode fails with `AgentUnavailable`.

pub mod collect;
pub mod config;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod matcher;
pub mod page;
pub mod prelude;
pub mod reduce;
pub mod report;
pub mod scan;
pub mod selectors;
pub mod stylesheet;

// Feature-gated retrieval strategy
#[cfg(feature = "agent")]
pub mod agent;

// ============================================================================
// Explicit Re-exports (avoiding glob imports for clear API surface)
// ============================================================================

// Error types
pub use error::{DeadstyleError, DeadstyleResult, IoResultExt, RetrievalError};

// Configuration
pub use config::{load_config, DeadstyleConfig, OutputConfig, RunConfig, DEFAULT_ROOT};

// The engine
pub use engine::{run, run_with_resolver, AnalysisReport, SkippedPage};

// Collection and reduction
pub use collect::{collect_selectors, CollectedRules, StylesheetSource};
pub use reduce::reduce_pseudo_variants;

// Matching
pub use matcher::matched_selectors;

// Candidate bookkeeping
pub use selectors::{has_pseudo_classes, strip_pseudo_classes, CandidateSet};

// Stylesheet parsing
pub use stylesheet::{parse_rules, Rule};

// Pages and retrieval
pub use fetch::{resolver_for, FetchMode, PageResolver, PlainResolver};
pub use page::{PageDescriptor, PageScript};

#[cfg(feature = "agent")]
pub use agent::AgentResolver;

// Stylesheet discovery
pub use scan::gather_css_files;

// Logging
pub use logging::{init_cli_logging, init_structured_logging};

// Reporting
pub use report::{print_json, print_plain};

//! Prelude module for convenient imports.
//!
//! Import commonly used types with a single line:
//!
//! ```rust,ignore
//! use deadstyle_core::prelude::*;
//! ```

// Core run types
pub use crate::config::{load_config, DeadstyleConfig, RunConfig, DEFAULT_ROOT};
pub use crate::engine::{run, run_with_resolver, AnalysisReport, SkippedPage};
pub use crate::error::{DeadstyleError, DeadstyleResult, RetrievalError};

// Pages and retrieval
pub use crate::fetch::{resolver_for, FetchMode, PageResolver, PlainResolver};
pub use crate::page::{PageDescriptor, PageScript};

#[cfg(feature = "agent")]
pub use crate::agent::AgentResolver;

// Candidate bookkeeping
pub use crate::selectors::CandidateSet;

// Stylesheet discovery
pub use crate::scan::gather_css_files;

// Reporting
pub use crate::report::{print_json, print_plain};

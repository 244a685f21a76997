//! Per-page selector matching through the DOM query engine.

use scraper::{Html, Selector};
use tracing::debug;

use crate::error::{DeadstyleError, DeadstyleResult};
use crate::selectors::{strip_pseudo_classes, CandidateSet};

/// Returns the candidates that match at least one node in `document`, in
/// candidate order.
///
/// Queries always use the stripped form of each candidate, so the query
/// engine never sees pseudo-class syntax; the candidate is reported under
/// its original text. A candidate whose stripped form is empty has nothing
/// left to query and is reported unmatched. A stripped form the query
/// engine rejects is a propagated fault.
///
/// Pure function of (document, candidate set); mutates neither.
pub fn matched_selectors(
    document: &Html,
    candidates: &CandidateSet,
) -> DeadstyleResult<Vec<String>> {
    let mut matched = Vec::new();

    for selector in candidates.iter() {
        let stripped = strip_pseudo_classes(selector);
        let query = stripped.trim();
        if query.is_empty() {
            continue;
        }

        let parsed = Selector::parse(query)
            .map_err(|e| DeadstyleError::selector(selector, e.to_string()))?;
        if document.select(&parsed).next().is_some() {
            debug!(selector = %selector, "matched");
            matched.push(selector.to_string());
        }
    }

    Ok(matched)
}

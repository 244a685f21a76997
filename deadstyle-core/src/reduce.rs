//! Pseudo-class reduction pass.

use std::collections::HashSet;
use tracing::debug;

use crate::selectors::{has_pseudo_classes, strip_pseudo_classes, CandidateSet};

/// Removes pseudo-bearing selectors whose stripped form is itself a
/// candidate.
///
/// Testing `.foo` already exercises the same nodes `.foo:hover` would, so
/// the variant is dropped before page analysis to save one query per page.
/// This is a deliberate approximation, not exact CSS semantics.
///
/// Membership is checked against a snapshot of the set taken before any
/// removal, so removals in one pass never change another selector's
/// eligibility. Returns the removed selectors.
pub fn reduce_pseudo_variants(candidates: &mut CandidateSet) -> Vec<String> {
    let snapshot = candidates.snapshot();
    let members: HashSet<&str> = snapshot.iter().map(String::as_str).collect();

    let mut removed = Vec::new();
    for selector in &snapshot {
        if !has_pseudo_classes(selector) {
            continue;
        }
        let stripped = strip_pseudo_classes(selector);
        if members.contains(stripped.as_str()) {
            candidates.remove(selector);
            debug!(selector = %selector, base = %stripped, "reduced pseudo-class variant");
            removed.push(selector.clone());
        }
    }
    removed
}

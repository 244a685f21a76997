//! Selector collection: ordered, de-duplicated aggregation of rule sources.

use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

use crate::error::DeadstyleResult;
use crate::selectors::CandidateSet;
use crate::stylesheet::{self, Rule};

/// An already-fetched stylesheet source: where it came from and its text.
///
/// Fetching happens in the engine; the collector never touches the network
/// or filesystem.
#[derive(Debug, Clone)]
pub struct StylesheetSource {
    pub location: String,
    pub text: String,
}

/// The candidate set plus the declaration block recorded for each selector.
#[derive(Debug, Default)]
pub struct CollectedRules {
    pub candidates: CandidateSet,
    pub declarations: HashMap<String, String>,
}

/// Merges rule sources into an ordered, de-duplicated candidate set.
///
/// Sources are parsed in the given order, the inline rule block last. The
/// first occurrence of a selector wins for both position and recorded
/// declarations; later occurrences are dropped. Selectors matching `ignore`
/// never enter the set and are never reconsidered.
pub fn collect_selectors(
    sources: &[StylesheetSource],
    inline_rules: &str,
    ignore: Option<&Regex>,
) -> DeadstyleResult<CollectedRules> {
    let mut collected = CollectedRules::default();

    for source in sources {
        let rules = stylesheet::parse_rules(&source.location, &source.text)?;
        merge_rules(&mut collected, rules, ignore);
    }

    if !inline_rules.trim().is_empty() {
        let rules = stylesheet::parse_rules("inline rules", inline_rules)?;
        merge_rules(&mut collected, rules, ignore);
    }

    Ok(collected)
}

fn merge_rules(collected: &mut CollectedRules, rules: Vec<Rule>, ignore: Option<&Regex>) {
    for rule in rules {
        if collected.candidates.contains(&rule.selector) {
            continue;
        }
        if let Some(pattern) = ignore {
            if pattern.is_match(&rule.selector) {
                debug!(selector = %rule.selector, "ignored");
                continue;
            }
        }
        collected.candidates.insert(&rule.selector);
        collected.declarations.insert(rule.selector, rule.declarations);
    }
}

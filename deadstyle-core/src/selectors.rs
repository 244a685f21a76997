//! Candidate selector bookkeeping and pseudo-class text handling.
//!
//! A [`CandidateSet`] holds the selectors not yet proven used: unique,
//! insertion order preserved, shrunk only by removal once collection is
//! done. The pseudo-class helpers implement the textual classification the
//! reducer and matcher share: one or two leading colons followed by a
//! word-and-hyphen identifier, anywhere in the selector.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Pseudo-class / pseudo-element syntax: `:hover`, `::before`, `:nth-child`.
fn pseudo_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"::?[\w-]+").expect("pseudo-class pattern compiles"))
}

/// True if the selector carries any pseudo-class or pseudo-element syntax.
pub fn has_pseudo_classes(selector: &str) -> bool {
    pseudo_pattern().is_match(selector)
}

/// The selector with every pseudo-class/pseudo-element substring deleted.
///
/// `.foo:hover` becomes `.foo`; `a::first-line` becomes `a`; a selector that
/// is nothing but pseudo syntax strips to the empty string.
pub fn strip_pseudo_classes(selector: &str) -> String {
    pseudo_pattern().replace_all(selector, "").into_owned()
}

/// Ordered collection of unique selectors, representing "not yet proven
/// used".
///
/// Insertion order is first-seen order across all merged sources. After
/// collection the set only ever shrinks; a removed selector never reappears.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    order: Vec<String>,
    present: HashSet<String>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a selector if it is not already present. Returns whether it
    /// was inserted.
    pub fn insert(&mut self, selector: &str) -> bool {
        if self.present.contains(selector) {
            return false;
        }
        self.present.insert(selector.to_string());
        self.order.push(selector.to_string());
        true
    }

    pub fn contains(&self, selector: &str) -> bool {
        self.present.contains(selector)
    }

    /// Removes a selector. Returns whether it was present.
    pub fn remove(&mut self, selector: &str) -> bool {
        if !self.present.remove(selector) {
            return false;
        }
        self.order.retain(|s| s != selector);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// An owned copy of the current members, for scans that must not observe
    /// concurrent removals.
    pub fn snapshot(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Consumes the set, yielding members in insertion order.
    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}

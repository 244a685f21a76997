//! Stylesheet parsing: raw CSS text into per-selector rules.
//!
//! Thin wrapper over LightningCSS. A rule with several comma-listed
//! selectors yields one entry per selector, all sharing the declaration
//! text. Rules nested in `@media` blocks are flattened; other at-rules
//! (`@font-face`, `@keyframes`, ...) carry no element selectors and are
//! skipped.

use lightningcss::printer::PrinterOptions;
use lightningcss::rules::{style::StyleRule, CssRule};
use lightningcss::stylesheet::{ParserOptions, StyleSheet};
use lightningcss::traits::ToCss;

use crate::error::{DeadstyleError, DeadstyleResult};

/// A single selector with its declaration block, as flat text.
///
/// The declaration text is an opaque payload: recorded, reported, never
/// interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub selector: String,
    pub declarations: String,
}

/// Parses raw stylesheet text into rules, in source order.
///
/// `label` names the source in parse errors (a location, or "inline rules").
pub fn parse_rules(label: &str, css_text: &str) -> DeadstyleResult<Vec<Rule>> {
    let sheet = StyleSheet::parse(css_text, ParserOptions::default())
        .map_err(|e| DeadstyleError::stylesheet_parse(label, e.to_string()))?;

    let mut rules = Vec::new();
    for rule in &sheet.rules.0 {
        match rule {
            CssRule::Style(style) => push_style_rule(style, &mut rules),
            CssRule::Media(media) => {
                for inner in &media.rules.0 {
                    if let CssRule::Style(style) = inner {
                        push_style_rule(style, &mut rules);
                    }
                }
            }
            _ => {}
        }
    }
    Ok(rules)
}

fn push_style_rule<'i>(style: &StyleRule<'i>, out: &mut Vec<Rule>) {
    let declarations = declaration_text(style);
    for selector in &style.selectors.0 {
        if let Ok(text) = selector.to_css_string(PrinterOptions::default()) {
            out.push(Rule {
                selector: text,
                declarations: declarations.clone(),
            });
        }
    }
}

/// Serializes the declaration block back to `prop: value; ...` text.
fn declaration_text<'i>(style: &StyleRule<'i>) -> String {
    let block = &style.declarations;
    let mut parts = Vec::new();

    for property in &block.declarations {
        if let Ok(value) = property.value_to_css_string(PrinterOptions::default()) {
            parts.push(format!("{}: {}", property.property_id().name(), value));
        }
    }
    for property in &block.important_declarations {
        if let Ok(value) = property.value_to_css_string(PrinterOptions::default()) {
            parts.push(format!("{}: {} !important", property.property_id().name(), value));
        }
    }

    parts.join("; ")
}

//! The elimination engine: collection, reduction, sequential page analysis.
//!
//! Pages are processed one at a time, strictly in the supplied order. A
//! selector matched on any page is removed permanently; what survives every
//! page is the report. The only locally recovered failure is a page
//! retrieval error, which skips that page and continues.

use std::collections::HashMap;
use std::io::{Read, Write};

use scraper::Html;
use tracing::{info, warn};

use crate::collect::{collect_selectors, StylesheetSource};
use crate::config::RunConfig;
use crate::error::{DeadstyleError, DeadstyleResult, IoResultExt};
use crate::fetch::{resolver_for, PageResolver};
use crate::matcher::matched_selectors;
use crate::page::PageDescriptor;
use crate::reduce::reduce_pseudo_variants;

/// A page that could not be retrieved; the run continued without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPage {
    pub page: String,
    pub reason: String,
}

/// Result of one elimination run.
#[derive(Debug, Default)]
pub struct AnalysisReport {
    /// Candidate count after reduction, before any page was analyzed.
    pub total_selectors: usize,
    /// Selectors no analyzed page matched, in insertion order.
    pub unused_selectors: Vec<String>,
    /// Declaration blocks recorded for every collected selector.
    pub declarations: HashMap<String, String>,
    /// Pages successfully analyzed.
    pub pages_processed: usize,
    /// Pages skipped after a retrieval failure.
    pub skipped_pages: Vec<SkippedPage>,
}

impl AnalysisReport {
    pub fn unused_count(&self) -> usize {
        self.unused_selectors.len()
    }

    pub fn has_unused(&self) -> bool {
        !self.unused_selectors.is_empty()
    }

    /// The run summary in the traditional wording.
    pub fn summary(&self) -> String {
        format!(
            "found {} unused selectors out of {} total",
            self.unused_count(),
            self.total_selectors
        )
    }

    /// Writes the unused selectors to `out`, one per line, in order.
    pub fn dump(&self, out: &mut dyn Write) -> std::io::Result<()> {
        for selector in &self.unused_selectors {
            writeln!(out, "{}", selector)?;
        }
        Ok(())
    }
}

/// Runs the full analysis with a resolver chosen from `config.mode`.
pub fn run(config: RunConfig) -> DeadstyleResult<AnalysisReport> {
    let resolver = resolver_for(config.mode, &config.root)?;
    run_with_resolver(config, resolver)
}

/// Runs the full analysis against a caller-supplied resolver.
///
/// This is the seam for tests and embedders that stub out retrieval; `run`
/// is this plus strategy selection.
pub fn run_with_resolver(
    config: RunConfig,
    mut resolver: Box<dyn PageResolver>,
) -> DeadstyleResult<AnalysisReport> {
    let RunConfig {
        stylesheets,
        rules,
        pages,
        ignore,
        ..
    } = config;

    // A stylesheet that cannot be fetched aborts the run: with a source
    // missing, the candidate set would be incomplete.
    let mut sources = Vec::with_capacity(stylesheets.len());
    for location in &stylesheets {
        info!(stylesheet = %location, "collecting");
        let text = resolver
            .fetch(location)
            .map_err(|e| DeadstyleError::stylesheet_fetch(location.as_str(), e))?;
        sources.push(StylesheetSource {
            location: location.clone(),
            text,
        });
    }

    let collected = collect_selectors(&sources, &rules, ignore.as_ref())?;
    let mut candidates = collected.candidates;
    let declarations = collected.declarations;

    reduce_pseudo_variants(&mut candidates);
    let total_selectors = candidates.len();
    info!(total = total_selectors, "candidate selectors collected");

    let mut pages_processed = 0usize;
    let mut skipped_pages = Vec::new();

    for page in pages {
        let label = page.label();
        let html = match page_html(page, resolver.as_mut()) {
            Ok(html) => html,
            Err(err) if err.is_recoverable() => {
                warn!(page = %label, error = %err, "page skipped");
                skipped_pages.push(SkippedPage {
                    page: label,
                    reason: err.to_string(),
                });
                continue;
            }
            Err(err) => return Err(err),
        };

        info!(page = %label, remaining = candidates.len(), "analyzing");
        let document = Html::parse_document(&html);
        for selector in matched_selectors(&document, &candidates)? {
            candidates.remove(&selector);
        }
        pages_processed += 1;
    }

    let report = AnalysisReport {
        total_selectors,
        unused_selectors: candidates.into_vec(),
        declarations,
        pages_processed,
        skipped_pages,
    };
    info!("{}", report.summary());
    Ok(report)
}

/// Resolves one page descriptor to HTML text.
fn page_html(page: PageDescriptor, resolver: &mut dyn PageResolver) -> DeadstyleResult<String> {
    match page {
        PageDescriptor::Html(html) => Ok(html),
        PageDescriptor::Reader(mut reader) => {
            let mut html = String::new();
            reader.read_to_string(&mut html).with_path("<reader>")?;
            Ok(html)
        }
        PageDescriptor::Script(mut script) => match script(resolver)? {
            Some(html) => Ok(html),
            None => resolver.current_document().map(str::to_owned).ok_or_else(|| {
                DeadstyleError::script(
                    "script requested the current document, but the resolver has none",
                )
            }),
        },
        PageDescriptor::Location(location) => Ok(resolver.fetch(&location)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RetrievalError;

    /// In-memory resolver: canned bodies per location, misses are NotFound.
    #[derive(Default)]
    struct StubResolver {
        bodies: HashMap<String, String>,
        current: Option<String>,
    }

    impl StubResolver {
        fn with(mut self, location: &str, body: &str) -> Self {
            self.bodies.insert(location.to_string(), body.to_string());
            self
        }
    }

    impl PageResolver for StubResolver {
        fn fetch(&mut self, location: &str) -> Result<String, RetrievalError> {
            match self.bodies.get(location) {
                Some(body) => {
                    self.current = Some(body.clone());
                    Ok(body.clone())
                }
                None => Err(RetrievalError::NotFound {
                    location: location.to_string(),
                }),
            }
        }

        fn current_document(&self) -> Option<&str> {
            self.current.as_deref()
        }
    }

    fn config(stylesheets: &[&str], rules: &str, pages: Vec<PageDescriptor>) -> RunConfig {
        RunConfig {
            stylesheets: stylesheets.iter().map(|s| s.to_string()).collect(),
            rules: rules.to_string(),
            pages,
            ..RunConfig::default()
        }
    }

    #[test]
    fn test_reduction_then_match_eliminates_everything() {
        // Collection filters `.baz`, reduction folds `.foo:hover` into
        // `.foo`, page 1 proves `.foo` used.
        let resolver = StubResolver::default().with(
            "/style.css",
            ".foo { color: red; } .foo:hover { color: blue; } .baz { color: green; }",
        );
        let cfg = config(
            &["/style.css"],
            "",
            vec![PageDescriptor::Html(r#"<div class="foo"></div>"#.into())],
        )
        .with_ignore_pattern("baz")
        .unwrap();

        let report = run_with_resolver(cfg, Box::new(resolver)).unwrap();
        assert_eq!(report.total_selectors, 1);
        assert!(report.unused_selectors.is_empty());
        assert_eq!(report.pages_processed, 1);
        assert_eq!(report.summary(), "found 0 unused selectors out of 1 total");
    }

    #[test]
    fn test_unreduced_variants_survive_unmatched_pages() {
        // `.a` is not a candidate of its own, so `.a:hover` survives
        // reduction; the page matches nothing; order is preserved.
        let cfg = config(
            &[],
            ".a:hover { color: red; } .b { color: blue; }",
            vec![PageDescriptor::Html("<span></span>".into())],
        );

        let report = run_with_resolver(cfg, Box::new(StubResolver::default())).unwrap();
        assert_eq!(report.unused_selectors, vec![".a:hover", ".b"]);
        assert_eq!(report.total_selectors, 2);
    }

    #[test]
    fn test_retrieval_failure_skips_page_and_continues() {
        let resolver = StubResolver::default()
            .with("/style.css", ".foo { color: red; }")
            .with("/two.html", r#"<div class="foo"></div>"#);
        let cfg = config(
            &["/style.css"],
            "",
            vec![
                PageDescriptor::Location("/one.html".into()),
                PageDescriptor::Location("/two.html".into()),
            ],
        );

        let report = run_with_resolver(cfg, Box::new(resolver)).unwrap();
        assert!(report.unused_selectors.is_empty());
        assert_eq!(report.pages_processed, 1);
        assert_eq!(report.skipped_pages.len(), 1);
        assert_eq!(report.skipped_pages[0].page, "/one.html");
        assert!(report.skipped_pages[0].reason.contains("was not found"));
    }

    #[test]
    fn test_removal_is_permanent_across_pages() {
        // Page 1 matches `.used`; page 2 contains nothing, which must not
        // resurrect it. `.never` survives both.
        let cfg = config(
            &[],
            ".used { color: red; } .never { color: blue; }",
            vec![
                PageDescriptor::Html(r#"<div class="used"></div>"#.into()),
                PageDescriptor::Html("<p></p>".into()),
            ],
        );

        let report = run_with_resolver(cfg, Box::new(StubResolver::default())).unwrap();
        assert_eq!(report.unused_selectors, vec![".never"]);
        assert_eq!(report.pages_processed, 2);
    }

    #[test]
    fn test_stylesheet_fetch_failure_is_fatal() {
        let cfg = config(
            &["/missing.css"],
            "",
            vec![PageDescriptor::Html("<p></p>".into())],
        );

        let err = run_with_resolver(cfg, Box::new(StubResolver::default())).unwrap_err();
        assert!(matches!(err, DeadstyleError::StylesheetFetch { .. }));
        assert!(err.to_string().contains("/missing.css"));
    }

    #[test]
    fn test_reader_page_is_analyzed() {
        let html: &[u8] = br#"<div id="x"></div>"#;
        let cfg = config(
            &[],
            "#x { color: red; } #y { color: blue; }",
            vec![PageDescriptor::Reader(Box::new(html))],
        );

        let report = run_with_resolver(cfg, Box::new(StubResolver::default())).unwrap();
        assert_eq!(report.unused_selectors, vec!["#y"]);
    }

    #[test]
    fn test_script_page_uses_current_document() {
        let resolver = StubResolver::default().with("/login", r#"<form class="login"></form>"#);
        let cfg = config(
            &[],
            ".login { color: red; }",
            vec![PageDescriptor::Script(Box::new(
                |resolver: &mut dyn PageResolver| {
                    resolver.fetch("/login")?;
                    Ok(None)
                },
            ))],
        );

        let report = run_with_resolver(cfg, Box::new(resolver)).unwrap();
        assert!(report.unused_selectors.is_empty());
    }

    #[test]
    fn test_script_retrieval_failure_is_skipped() {
        let cfg = config(
            &[],
            ".x { color: red; }",
            vec![PageDescriptor::Script(Box::new(
                |resolver: &mut dyn PageResolver| {
                    resolver.fetch("/gone")?;
                    Ok(None)
                },
            ))],
        );

        let report = run_with_resolver(cfg, Box::new(StubResolver::default())).unwrap();
        assert_eq!(report.unused_selectors, vec![".x"]);
        assert_eq!(report.skipped_pages.len(), 1);
        assert_eq!(report.skipped_pages[0].page, "<script>");
    }

    #[test]
    fn test_script_without_current_document_is_fatal() {
        let cfg = config(
            &[],
            ".x { color: red; }",
            vec![PageDescriptor::Script(Box::new(
                |_: &mut dyn PageResolver| Ok(None),
            ))],
        );

        let err = run_with_resolver(cfg, Box::new(StubResolver::default())).unwrap_err();
        assert!(matches!(err, DeadstyleError::Script { .. }));
    }

    #[test]
    fn test_dump_writes_one_selector_per_line() {
        let report = AnalysisReport {
            total_selectors: 3,
            unused_selectors: vec![".a".into(), "#b".into()],
            ..AnalysisReport::default()
        };

        let mut out = Vec::new();
        report.dump(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ".a\n#b\n");
    }
}

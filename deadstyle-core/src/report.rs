//! Output formatting - plaintext and JSON.

use serde_json::json;

use crate::engine::AnalysisReport;

/// Prints the unused selectors one per line, in surviving insertion order.
pub fn print_plain(report: &AnalysisReport) {
    for selector in &report.unused_selectors {
        println!("{}", selector);
    }
}

/// Prints the full report as JSON.
///
/// Falls back to the plain list if serialization fails (should never happen
/// with string data, but the tool should degrade rather than die at the
/// last step).
pub fn print_json(report: &AnalysisReport) {
    let declarations: serde_json::Map<String, serde_json::Value> = report
        .unused_selectors
        .iter()
        .filter_map(|selector| {
            report
                .declarations
                .get(selector)
                .map(|decls| (selector.clone(), json!(decls)))
        })
        .collect();

    let payload = json!({
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "total_selectors": report.total_selectors,
        "unused_count": report.unused_count(),
        "unused_selectors": report.unused_selectors,
        "declarations": declarations,
        "pages_processed": report.pages_processed,
        "skipped_pages": report
            .skipped_pages
            .iter()
            .map(|s| json!({ "page": s.page, "reason": s.reason }))
            .collect::<Vec<_>>(),
    });

    match serde_json::to_string_pretty(&payload) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => {
            eprintln!("[WARN] JSON serialization failed: {}", e);
            print_plain(report);
        }
    }
}

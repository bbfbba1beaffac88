//! User-facing output of a check run.

use crate::validate::ValidationOutcome;

/// Format violations and notices one per line, in diff order.
///
/// Returns an empty string for a clean run without notices.
pub fn format_report(outcome: &ValidationOutcome) -> String {
    let mut out = String::new();

    for finding in &outcome.findings {
        out.push_str(&finding.to_string());
        out.push('\n');
    }

    out
}

/// Print the report to stdout.
pub fn print_report(outcome: &ValidationOutcome) {
    let report = format_report(outcome);
    if !report.is_empty() {
        print!("{}", report);
    }
}

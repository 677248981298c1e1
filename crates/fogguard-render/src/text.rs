use crate::RenderableReport;

/// Plain-text decision for terminals.
///
/// Two header lines always; with `explain`, one line per failed predicate (or a note
/// that everything passed).
pub fn render_text(report: &RenderableReport, explain: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("Policy Decision: {}\n", report.verdict.label()));
    out.push_str(&format!("Policy: {}\n", report.data.policy));

    if !explain {
        return out;
    }

    if report.findings.is_empty() {
        out.push_str(&format!(
            "\nAll {} predicates passed.\n",
            report.data.predicates_evaluated
        ));
        return out;
    }

    out.push_str("\nFailed predicates:\n");
    for f in &report.findings {
        out.push_str(&format!("  - {}: {}\n", f.predicate, f.message));
        if let Some(help) = &f.help {
            out.push_str(&format!("    help: {}\n", help));
        }
    }
    out
}

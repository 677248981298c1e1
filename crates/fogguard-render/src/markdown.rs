use crate::{RenderableReport, RenderableVerdict};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Fogguard decision\n\n");
    out.push_str(&format!(
        "- Verdict: **{}**\n- Policy: `{}`\n",
        report.verdict.label(),
        report.data.policy
    ));
    if let Some(profile) = &report.data.profile {
        out.push_str(&format!("- Profile: `{}`\n", profile));
    }
    out.push_str(&format!(
        "- Encoded payload check: {}\n- Predicates evaluated: {}\n\n",
        if report.data.enforce_encoded_payload {
            "enforced"
        } else {
            "off"
        },
        report.data.predicates_evaluated
    ));

    if report.findings.is_empty() {
        let note = match report.verdict {
            RenderableVerdict::Allow => "All predicates passed.\n",
            RenderableVerdict::Deny => "Denied without findings.\n",
        };
        out.push_str(note);
        return out;
    }

    out.push_str("## Failed predicates\n\n");

    for f in &report.findings {
        out.push_str(&format!(
            "### `{}`\n\n- code: `{}`\n- {}\n",
            f.predicate, f.code, f.message
        ));
        if let Some(help) = &f.help {
            out.push_str(&format!("- help: {}\n", help));
        }
        out.push('\n');
    }

    out
}

//! The `explain` use case.
//!
//! An explanation places the predicate in the evaluation order, lists the codes
//! it can report, and replays its denied/admitted examples through the engine
//! so the printed verdicts are the ones `check` would give.

use fogguard_domain::{PolicyConfig, Request, evaluate, predicates};
use fogguard_settings::{FeatureFlags, PRESET_DEFAULT, resolve_preset};
use fogguard_types::explain::{self, Explanation};
use fogguard_types::ids;
use serde_json::{Value, json};

/// Where a predicate sits in the composer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredicateSlot {
    pub id: &'static str,
    /// 1-based position in evaluation order.
    pub position: usize,
    pub codes: &'static [&'static str],
}

/// A complete request run through the engine.
#[derive(Clone, Debug)]
pub struct WorkedRequest {
    pub request: Value,
    pub failed: Vec<&'static str>,
    /// Whether the explained predicate itself fails for this request.
    pub trips_predicate: bool,
}

#[derive(Clone, Debug)]
pub struct PredicateExplanation {
    pub identifier: String,
    pub explanation: Explanation,
    pub slot: PredicateSlot,
    /// `(heuristic, code)` pairs; only set for `not_encoded_payload`.
    pub heuristics: &'static [(&'static str, &'static str)],
    pub denied: Option<WorkedRequest>,
    pub admitted: Option<WorkedRequest>,
}

#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(Box<PredicateExplanation>),
    NotFound {
        identifier: String,
        /// Predicates and codes whose name contains the identifier.
        suggestions: Vec<&'static str>,
    },
}

/// Explain a predicate ID or finding code.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    let (Some(explanation), Some(slot)) =
        (explain::lookup_explanation(identifier), predicate_slot(identifier))
    else {
        return ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            suggestions: suggestions_for(identifier),
        };
    };

    let heuristics: &'static [(&'static str, &'static str)] =
        if slot.id == ids::PREDICATE_NOT_ENCODED_PAYLOAD {
            &ids::ENCODING_HEURISTICS
        } else {
            &[]
        };

    let cfg = example_policy();
    let replay = |fragment: &str| {
        cfg.as_ref()
            .and_then(|cfg| worked_request(fragment, slot.id, cfg))
    };
    let denied = replay(explanation.examples.before);
    let admitted = replay(explanation.examples.after);

    ExplainOutput::Found(Box::new(PredicateExplanation {
        identifier: identifier.to_string(),
        explanation,
        slot,
        heuristics,
        denied,
        admitted,
    }))
}

fn predicate_slot(identifier: &str) -> Option<PredicateSlot> {
    let id = ids::predicate_for_code(identifier).unwrap_or(identifier);
    let index = ids::PREDICATE_ORDER.iter().position(|p| *p == id)?;
    Some(PredicateSlot {
        id: ids::PREDICATE_ORDER[index],
        position: index + 1,
        codes: ids::codes_for_predicate(id),
    })
}

fn suggestions_for(identifier: &str) -> Vec<&'static str> {
    let needle = identifier.trim();
    if needle.is_empty() {
        return Vec::new();
    }
    explain::all_predicate_ids()
        .iter()
        .chain(explain::all_codes())
        .copied()
        .filter(|known| known.contains(needle))
        .collect()
}

/// Every example request starts from this one. It passes all predicates
/// under [`example_policy`].
fn baseline_request() -> Value {
    json!({
        "pauseBeforePropagate": true,
        "intent": "creative",
        "domain": "github.com",
        "ttl": 3,
        "children": 5,
        "concurrency": 2,
        "rate": 30
    })
}

/// The default preset with the encoded-payload check switched on.
fn example_policy() -> Option<PolicyConfig> {
    let flags = FeatureFlags {
        enforce_encoded_payload: Some(true),
    };
    resolve_preset(PRESET_DEFAULT, &flags)
        .ok()
        .map(|resolved| resolved.config)
}

fn worked_request(fragment: &str, predicate: &str, cfg: &PolicyConfig) -> Option<WorkedRequest> {
    let Ok(Value::Object(overrides)) = serde_json::from_str::<Value>(fragment) else {
        return None;
    };
    let mut request = baseline_request();
    let fields = request.as_object_mut()?;
    fields.extend(overrides);

    let req = Request::from_json(&request).ok()?;
    let trips_predicate = predicates::find(predicate).is_some_and(|p| !(p.holds)(&req, cfg));
    let failed = evaluate(&req, cfg).failed_predicates;

    Some(WorkedRequest {
        request,
        failed,
        trips_predicate,
    })
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &PredicateExplanation) -> String {
    let title = exp.explanation.title;
    let mut out = format!("{title}\n{}\n\n", "=".repeat(title.chars().count()));

    out.push_str(&format!(
        "Predicate: {} ({} of {})\n",
        exp.slot.id,
        exp.slot.position,
        ids::PREDICATE_ORDER.len()
    ));
    out.push_str(&format!("Codes: {}\n\n", exp.slot.codes.join(", ")));

    out.push_str(exp.explanation.description);
    out.push_str("\n\nRemediation\n-----------\n");
    out.push_str(exp.explanation.remediation);
    out.push('\n');

    if !exp.heuristics.is_empty() {
        out.push_str("\nHeuristics (the first match names the code)\n");
        out.push_str("-------------------------------------------\n");
        for (heuristic, code) in exp.heuristics {
            out.push_str(&format!("  - {heuristic} -> {code}\n"));
        }
    }

    if exp.denied.is_some() || exp.admitted.is_some() {
        out.push_str("\nWorked example (default preset, encoded-payload check on)\n");
        out.push_str("---------------------------------------------------------\n");
        for (label, worked) in [("Denied", &exp.denied), ("Admitted", &exp.admitted)] {
            if let Some(worked) = worked {
                out.push_str(&format!("\n{label}:\n{:#}\n=> {}\n", worked.request, outcome(worked)));
            }
        }
    }

    out
}

fn outcome(worked: &WorkedRequest) -> String {
    if worked.failed.is_empty() {
        "allow".to_string()
    } else {
        format!("deny ({})", worked.failed.join(", "))
    }
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(identifier: &str, suggestions: &[&str]) -> String {
    let mut out = format!("Unknown predicate or code: {identifier}\n\n");

    if !suggestions.is_empty() {
        out.push_str("Did you mean:\n");
        for s in suggestions {
            out.push_str(&format!("  - {s}\n"));
        }
        out.push('\n');
    }

    out.push_str("Known predicates, in evaluation order:\n");
    for (position, (id, codes)) in ids::PREDICATE_CODES.iter().enumerate() {
        out.push_str(&format!("  {}. {id} [{}]\n", position + 1, codes.join(", ")));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(identifier: &str) -> PredicateExplanation {
        match run_explain(identifier) {
            ExplainOutput::Found(exp) => *exp,
            ExplainOutput::NotFound { .. } => panic!("{identifier} should be explained"),
        }
    }

    #[test]
    fn codes_resolve_to_their_predicate_slot() {
        let exp = found(ids::CODE_RATE_EXCEEDS_LIMIT);
        assert_eq!(exp.slot.id, ids::PREDICATE_WITHIN_LIMITS_RATE);
        assert_eq!(exp.slot.position, 7);
        assert_eq!(exp.slot.codes, &[ids::CODE_RATE_EXCEEDS_LIMIT]);

        let exp = found(ids::PREDICATE_PAUSE_BEFORE_PROPAGATE);
        assert_eq!(exp.slot.position, 1);
    }

    #[test]
    fn every_example_pair_replays_as_deny_then_allow() {
        for identifier in explain::all_predicate_ids()
            .iter()
            .chain(explain::all_codes())
        {
            let exp = found(identifier);
            let denied = exp.denied.expect("denied example replays");
            let admitted = exp.admitted.expect("admitted example replays");
            assert!(denied.trips_predicate, "{identifier}: denied example passes");
            assert_eq!(denied.failed, vec![exp.slot.id], "{identifier}");
            assert!(!admitted.trips_predicate, "{identifier}");
            assert!(admitted.failed.is_empty(), "{identifier}: {:?}", admitted.failed);
        }
    }

    #[test]
    fn encoded_payload_lists_heuristics_in_priority_order() {
        let exp = found(ids::PREDICATE_NOT_ENCODED_PAYLOAD);
        assert_eq!(exp.heuristics.len(), 3);
        let text = format_explanation(&exp);
        let base64 = text.find("base64_like -> base64_payload").expect("base64 listed");
        let url = text.find("url_encoded -> url_encoded_payload").expect("url listed");
        let data = text.find("data_uri -> data_uri_payload").expect("data uri listed");
        assert!(base64 < url && url < data);

        assert!(found(ids::PREDICATE_DOMAIN_ALLOWED).heuristics.is_empty());
    }

    #[test]
    fn formatted_explanation_shows_slot_and_verdicts() {
        let text = format_explanation(&found(ids::PREDICATE_DOMAIN_ALLOWED));
        assert!(text.starts_with("Safe Domain\n===========\n"));
        assert!(text.contains("Predicate: domain_allowed (3 of 9)"));
        assert!(text.contains("Codes: domain_not_allowlisted"));
        assert!(text.contains("\"domain\": \"githüb.com\""));
        assert!(text.contains("=> deny (domain_allowed)"));
        assert!(text.contains("=> allow"));
        assert!(!text.contains("Heuristics"));
    }

    #[test]
    fn unknown_identifier_suggests_by_substring() {
        match run_explain("within_limits") {
            ExplainOutput::NotFound {
                identifier,
                suggestions,
            } => {
                assert_eq!(identifier, "within_limits");
                assert_eq!(
                    suggestions,
                    vec![
                        ids::PREDICATE_WITHIN_LIMITS_TTL,
                        ids::PREDICATE_WITHIN_LIMITS_CHILDREN,
                        ids::PREDICATE_WITHIN_LIMITS_CONCURRENCY,
                        ids::PREDICATE_WITHIN_LIMITS_RATE,
                    ]
                );
            }
            ExplainOutput::Found(_) => panic!("within_limits is a namespace, not a predicate"),
        }
        assert!(matches!(
            run_explain("   "),
            ExplainOutput::NotFound { suggestions, .. } if suggestions.is_empty()
        ));
    }

    #[test]
    fn not_found_message_numbers_the_predicates() {
        let text = format_not_found("payload", &["not_encoded_payload"]);
        assert!(text.starts_with("Unknown predicate or code: payload\n\nDid you mean:\n"));
        assert!(text.contains("  1. pause_before_propagate [pause_missing]"));
        assert!(text.contains(
            "  9. not_encoded_payload [base64_payload, url_encoded_payload, data_uri_payload]"
        ));
        assert!(!format_not_found("zzz", &[]).contains("Did you mean"));
    }
}

use super::Predicate;
use super::utils::finding;
use crate::model::Request;
use crate::payload::{detect_encoding, is_encoded_payload};
use crate::policy::PolicyConfig;
use fogguard_types::{Finding, ids};
use serde_json::json;

pub const NOT_ENCODED_PAYLOAD: Predicate = Predicate {
    id: ids::PREDICATE_NOT_ENCODED_PAYLOAD,
    holds: not_encoded_payload,
    finding: explain,
};

/// Always true while the feature flag is off, and for blank payloads.
pub fn not_encoded_payload(req: &Request, cfg: &PolicyConfig) -> bool {
    if !cfg.enforce_encoded_payload {
        return true;
    }
    match req.inspectable_payload() {
        Some(payload) => !is_encoded_payload(payload),
        None => true,
    }
}

fn explain(req: &Request, _cfg: &PolicyConfig) -> Finding {
    let payload = req.inspectable_payload().unwrap_or_default();
    let signals = detect_encoding(payload);
    let fired = signals.fired();
    let code = signals.primary_code().unwrap_or(ids::CODE_BASE64_PAYLOAD);

    finding(
        ids::PREDICATE_NOT_ENCODED_PAYLOAD,
        code,
        format!("payload looks encoded ({})", fired.join(", ")),
        "Send payloads as plain, reviewable text.",
        &[payload],
        json!({
            "heuristics": fired,
            "payload_len": payload.chars().count(),
        }),
    )
}

//! Intent and domain allowlists. Exact, case-sensitive, byte-for-byte matching.

use super::Predicate;
use super::utils::finding;
use crate::model::Request;
use crate::policy::PolicyConfig;
use fogguard_types::{Finding, ids};
use serde_json::json;

pub const INTENT_ALLOWED: Predicate = Predicate {
    id: ids::PREDICATE_INTENT_ALLOWED,
    holds: intent_allowed,
    finding: explain_intent,
};

pub const DOMAIN_ALLOWED: Predicate = Predicate {
    id: ids::PREDICATE_DOMAIN_ALLOWED,
    holds: domain_allowed,
    finding: explain_domain,
};

pub fn intent_allowed(req: &Request, cfg: &PolicyConfig) -> bool {
    cfg.intent_allowed(&req.intent)
}

pub fn domain_allowed(req: &Request, cfg: &PolicyConfig) -> bool {
    cfg.domain_allowed(&req.domain)
}

fn explain_intent(req: &Request, _cfg: &PolicyConfig) -> Finding {
    finding(
        ids::PREDICATE_INTENT_ALLOWED,
        ids::CODE_INTENT_NOT_ALLOWLISTED,
        format!("intent '{}' is not in the wholesome intents allowlist", req.intent),
        "Declare an allowlisted intent, or ask the policy owner to add this one.",
        &[req.intent.as_str()],
        json!({ "intent": req.intent }),
    )
}

fn explain_domain(req: &Request, _cfg: &PolicyConfig) -> Finding {
    finding(
        ids::PREDICATE_DOMAIN_ALLOWED,
        ids::CODE_DOMAIN_NOT_ALLOWLISTED,
        format!("domain '{}' is not in the safe domains allowlist", req.domain),
        "Target an allowlisted domain exactly as written; no normalization is applied.",
        &[req.domain.as_str()],
        json!({ "domain": req.domain }),
    )
}

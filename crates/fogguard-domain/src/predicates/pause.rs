use super::Predicate;
use super::utils::finding;
use crate::model::Request;
use crate::policy::PolicyConfig;
use fogguard_types::{Finding, ids};
use serde_json::json;

pub const PAUSE_BEFORE_PROPAGATE: Predicate = Predicate {
    id: ids::PREDICATE_PAUSE_BEFORE_PROPAGATE,
    holds: paused,
    finding: explain,
};

pub fn paused(req: &Request, _cfg: &PolicyConfig) -> bool {
    req.pause_before_propagate
}

fn explain(_req: &Request, _cfg: &PolicyConfig) -> Finding {
    finding(
        ids::PREDICATE_PAUSE_BEFORE_PROPAGATE,
        ids::CODE_PAUSE_MISSING,
        "request did not attest a pause before propagating".to_string(),
        "Pause for review, then set pauseBeforePropagate to true.",
        &[],
        json!({ "pause_before_propagate": false }),
    )
}

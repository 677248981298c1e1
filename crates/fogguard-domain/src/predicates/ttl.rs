use super::Predicate;
use super::utils::finding;
use crate::model::Request;
use crate::policy::PolicyConfig;
use fogguard_types::{Finding, ids};
use serde_json::json;

/// Strict positivity, checked in addition to `within_limits.ttl`.
pub const TTL_POSITIVE: Predicate = Predicate {
    id: ids::PREDICATE_TTL_POSITIVE,
    holds: ttl_positive,
    finding: explain,
};

pub fn ttl_positive(req: &Request, _cfg: &PolicyConfig) -> bool {
    req.ttl > 0
}

fn explain(req: &Request, _cfg: &PolicyConfig) -> Finding {
    let ttl = req.ttl.to_string();
    finding(
        ids::PREDICATE_TTL_POSITIVE,
        ids::CODE_TTL_NOT_POSITIVE,
        format!("ttl {ttl} is not positive; the action has no hops left"),
        "Stop propagating once the TTL is exhausted.",
        &[ttl.as_str()],
        json!({ "ttl": req.ttl }),
    )
}

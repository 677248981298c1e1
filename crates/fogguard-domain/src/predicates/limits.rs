//! Inclusive (`<=`) resource limits, one predicate per dimension so a denial
//! names exactly which dimension was exceeded.

use super::Predicate;
use super::utils::finding;
use crate::model::Request;
use crate::policy::PolicyConfig;
use fogguard_types::{Finding, ids};
use serde_json::json;

pub const TTL_WITHIN_LIMIT: Predicate = Predicate {
    id: ids::PREDICATE_WITHIN_LIMITS_TTL,
    holds: ttl_within,
    finding: explain_ttl,
};

pub const CHILDREN_WITHIN_LIMIT: Predicate = Predicate {
    id: ids::PREDICATE_WITHIN_LIMITS_CHILDREN,
    holds: children_within,
    finding: explain_children,
};

pub const CONCURRENCY_WITHIN_LIMIT: Predicate = Predicate {
    id: ids::PREDICATE_WITHIN_LIMITS_CONCURRENCY,
    holds: concurrency_within,
    finding: explain_concurrency,
};

pub const RATE_WITHIN_LIMIT: Predicate = Predicate {
    id: ids::PREDICATE_WITHIN_LIMITS_RATE,
    holds: rate_within,
    finding: explain_rate,
};

pub fn ttl_within(req: &Request, cfg: &PolicyConfig) -> bool {
    req.ttl <= cfg.limits.max_ttl
}

pub fn children_within(req: &Request, cfg: &PolicyConfig) -> bool {
    req.children <= cfg.limits.max_children
}

pub fn concurrency_within(req: &Request, cfg: &PolicyConfig) -> bool {
    req.concurrency <= cfg.limits.max_concurrency
}

/// NaN never compares `<=`, so a NaN rate is denied.
pub fn rate_within(req: &Request, cfg: &PolicyConfig) -> bool {
    req.rate <= cfg.limits.max_rate_per_minute
}

fn exceeded(
    predicate: &str,
    code: &str,
    field: &str,
    limit_name: &str,
    value: String,
    limit: String,
    data: serde_json::Value,
) -> Finding {
    finding(
        predicate,
        code,
        format!("{field} {value} exceeds {limit_name} {limit}"),
        "Lower the requested value to the policy limit or below.",
        &[value.as_str(), limit.as_str()],
        data,
    )
}

fn explain_ttl(req: &Request, cfg: &PolicyConfig) -> Finding {
    exceeded(
        ids::PREDICATE_WITHIN_LIMITS_TTL,
        ids::CODE_TTL_EXCEEDS_LIMIT,
        "ttl",
        "max_ttl",
        req.ttl.to_string(),
        cfg.limits.max_ttl.to_string(),
        json!({ "field": "ttl", "value": req.ttl, "limit": cfg.limits.max_ttl }),
    )
}

fn explain_children(req: &Request, cfg: &PolicyConfig) -> Finding {
    exceeded(
        ids::PREDICATE_WITHIN_LIMITS_CHILDREN,
        ids::CODE_CHILDREN_EXCEED_LIMIT,
        "children",
        "max_children",
        req.children.to_string(),
        cfg.limits.max_children.to_string(),
        json!({ "field": "children", "value": req.children, "limit": cfg.limits.max_children }),
    )
}

fn explain_concurrency(req: &Request, cfg: &PolicyConfig) -> Finding {
    exceeded(
        ids::PREDICATE_WITHIN_LIMITS_CONCURRENCY,
        ids::CODE_CONCURRENCY_EXCEEDS_LIMIT,
        "concurrency",
        "max_concurrency",
        req.concurrency.to_string(),
        cfg.limits.max_concurrency.to_string(),
        json!({
            "field": "concurrency",
            "value": req.concurrency,
            "limit": cfg.limits.max_concurrency,
        }),
    )
}

fn explain_rate(req: &Request, cfg: &PolicyConfig) -> Finding {
    exceeded(
        ids::PREDICATE_WITHIN_LIMITS_RATE,
        ids::CODE_RATE_EXCEEDS_LIMIT,
        "rate",
        "max_rate_per_minute",
        req.rate.to_string(),
        cfg.limits.max_rate_per_minute.to_string(),
        json!({
            "field": "rate",
            "value": req.rate,
            "limit": cfg.limits.max_rate_per_minute,
        }),
    )
}

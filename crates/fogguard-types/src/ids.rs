//! Stable identifiers for predicates and finding codes.
//!
//! A predicate ID is the name reported in `failed_predicates`. Limit
//! predicates share the `within_limits.` namespace so callers can group them.
//! `code` is a short snake_case discriminator for why the predicate failed.

// Predicates, in evaluation order.
pub const PREDICATE_PAUSE_BEFORE_PROPAGATE: &str = "pause_before_propagate";
pub const PREDICATE_INTENT_ALLOWED: &str = "intent_allowed";
pub const PREDICATE_DOMAIN_ALLOWED: &str = "domain_allowed";
pub const PREDICATE_WITHIN_LIMITS_TTL: &str = "within_limits.ttl";
pub const PREDICATE_WITHIN_LIMITS_CHILDREN: &str = "within_limits.children";
pub const PREDICATE_WITHIN_LIMITS_CONCURRENCY: &str = "within_limits.concurrency";
pub const PREDICATE_WITHIN_LIMITS_RATE: &str = "within_limits.rate";
pub const PREDICATE_TTL_POSITIVE: &str = "ttl_positive";
pub const PREDICATE_NOT_ENCODED_PAYLOAD: &str = "not_encoded_payload";

/// Every predicate ID in the order the composer evaluates them.
pub const PREDICATE_ORDER: [&str; 9] = [
    PREDICATE_PAUSE_BEFORE_PROPAGATE,
    PREDICATE_INTENT_ALLOWED,
    PREDICATE_DOMAIN_ALLOWED,
    PREDICATE_WITHIN_LIMITS_TTL,
    PREDICATE_WITHIN_LIMITS_CHILDREN,
    PREDICATE_WITHIN_LIMITS_CONCURRENCY,
    PREDICATE_WITHIN_LIMITS_RATE,
    PREDICATE_TTL_POSITIVE,
    PREDICATE_NOT_ENCODED_PAYLOAD,
];

// Codes: pause_before_propagate
pub const CODE_PAUSE_MISSING: &str = "pause_missing";

// Codes: intent_allowed / domain_allowed
pub const CODE_INTENT_NOT_ALLOWLISTED: &str = "intent_not_allowlisted";
pub const CODE_DOMAIN_NOT_ALLOWLISTED: &str = "domain_not_allowlisted";

// Codes: within_limits.*
pub const CODE_TTL_EXCEEDS_LIMIT: &str = "ttl_exceeds_limit";
pub const CODE_CHILDREN_EXCEED_LIMIT: &str = "children_exceed_limit";
pub const CODE_CONCURRENCY_EXCEEDS_LIMIT: &str = "concurrency_exceeds_limit";
pub const CODE_RATE_EXCEEDS_LIMIT: &str = "rate_exceeds_limit";

// Codes: ttl_positive
pub const CODE_TTL_NOT_POSITIVE: &str = "ttl_not_positive";

// Codes: not_encoded_payload
pub const CODE_BASE64_PAYLOAD: &str = "base64_payload";
pub const CODE_URL_ENCODED_PAYLOAD: &str = "url_encoded_payload";
pub const CODE_DATA_URI_PAYLOAD: &str = "data_uri_payload";

// Encoded-payload sub-heuristic names (reported in finding data).
pub const HEURISTIC_BASE64_LIKE: &str = "base64_like";
pub const HEURISTIC_URL_ENCODED: &str = "url_encoded";
pub const HEURISTIC_DATA_URI: &str = "data_uri";

/// Encoded-payload heuristics paired with their finding code. When several
/// fire, the first one in this order names the code.
pub const ENCODING_HEURISTICS: [(&str, &str); 3] = [
    (HEURISTIC_BASE64_LIKE, CODE_BASE64_PAYLOAD),
    (HEURISTIC_URL_ENCODED, CODE_URL_ENCODED_PAYLOAD),
    (HEURISTIC_DATA_URI, CODE_DATA_URI_PAYLOAD),
];

/// Codes each predicate can report, in evaluation order.
pub const PREDICATE_CODES: [(&str, &[&str]); 9] = [
    (PREDICATE_PAUSE_BEFORE_PROPAGATE, &[CODE_PAUSE_MISSING]),
    (PREDICATE_INTENT_ALLOWED, &[CODE_INTENT_NOT_ALLOWLISTED]),
    (PREDICATE_DOMAIN_ALLOWED, &[CODE_DOMAIN_NOT_ALLOWLISTED]),
    (PREDICATE_WITHIN_LIMITS_TTL, &[CODE_TTL_EXCEEDS_LIMIT]),
    (PREDICATE_WITHIN_LIMITS_CHILDREN, &[CODE_CHILDREN_EXCEED_LIMIT]),
    (PREDICATE_WITHIN_LIMITS_CONCURRENCY, &[CODE_CONCURRENCY_EXCEEDS_LIMIT]),
    (PREDICATE_WITHIN_LIMITS_RATE, &[CODE_RATE_EXCEEDS_LIMIT]),
    (PREDICATE_TTL_POSITIVE, &[CODE_TTL_NOT_POSITIVE]),
    (
        PREDICATE_NOT_ENCODED_PAYLOAD,
        &[CODE_BASE64_PAYLOAD, CODE_URL_ENCODED_PAYLOAD, CODE_DATA_URI_PAYLOAD],
    ),
];

/// Codes a predicate can report; empty for an unknown ID.
pub fn codes_for_predicate(predicate: &str) -> &'static [&'static str] {
    PREDICATE_CODES
        .iter()
        .find(|(id, _)| *id == predicate)
        .map(|(_, codes)| *codes)
        .unwrap_or(&[])
}

/// The predicate that reports `code`.
pub fn predicate_for_code(code: &str) -> Option<&'static str> {
    PREDICATE_CODES
        .iter()
        .find(|(_, codes)| codes.contains(&code))
        .map(|(id, _)| *id)
}

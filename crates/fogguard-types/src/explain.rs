//! Explain registry for predicates and codes.
//!
//! Maps predicate IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a predicate or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the predicate/code.
    pub title: &'static str,
    /// What the predicate does and why it exists.
    pub description: &'static str,
    /// How to get a request admitted.
    pub remediation: &'static str,
    /// Before/after request examples.
    pub examples: ExamplePair,
}

/// Before and after request examples (JSON).
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Request that would be denied.
    pub before: &'static str,
    /// Request that passes the predicate.
    pub after: &'static str,
}

/// Look up an explanation by predicate ID or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Predicates
        ids::PREDICATE_PAUSE_BEFORE_PROPAGATE => Some(explain_pause_before_propagate()),
        ids::PREDICATE_INTENT_ALLOWED => Some(explain_intent_allowed()),
        ids::PREDICATE_DOMAIN_ALLOWED => Some(explain_domain_allowed()),
        ids::PREDICATE_WITHIN_LIMITS_TTL => Some(explain_ttl_limit()),
        ids::PREDICATE_WITHIN_LIMITS_CHILDREN => Some(explain_children_limit()),
        ids::PREDICATE_WITHIN_LIMITS_CONCURRENCY => Some(explain_concurrency_limit()),
        ids::PREDICATE_WITHIN_LIMITS_RATE => Some(explain_rate_limit()),
        ids::PREDICATE_TTL_POSITIVE => Some(explain_ttl_positive()),
        ids::PREDICATE_NOT_ENCODED_PAYLOAD => Some(explain_not_encoded_payload()),

        // Codes
        ids::CODE_PAUSE_MISSING => Some(explain_pause_before_propagate()),
        ids::CODE_INTENT_NOT_ALLOWLISTED => Some(explain_intent_allowed()),
        ids::CODE_DOMAIN_NOT_ALLOWLISTED => Some(explain_domain_allowed()),
        ids::CODE_TTL_EXCEEDS_LIMIT => Some(explain_ttl_limit()),
        ids::CODE_CHILDREN_EXCEED_LIMIT => Some(explain_children_limit()),
        ids::CODE_CONCURRENCY_EXCEEDS_LIMIT => Some(explain_concurrency_limit()),
        ids::CODE_RATE_EXCEEDS_LIMIT => Some(explain_rate_limit()),
        ids::CODE_TTL_NOT_POSITIVE => Some(explain_ttl_positive()),
        ids::CODE_BASE64_PAYLOAD => Some(explain_base64_payload()),
        ids::CODE_URL_ENCODED_PAYLOAD => Some(explain_url_encoded_payload()),
        ids::CODE_DATA_URI_PAYLOAD => Some(explain_data_uri_payload()),

        _ => None,
    }
}

/// List all known predicate IDs, in evaluation order.
pub fn all_predicate_ids() -> &'static [&'static str] {
    &ids::PREDICATE_ORDER
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_PAUSE_MISSING,
        ids::CODE_INTENT_NOT_ALLOWLISTED,
        ids::CODE_DOMAIN_NOT_ALLOWLISTED,
        ids::CODE_TTL_EXCEEDS_LIMIT,
        ids::CODE_CHILDREN_EXCEED_LIMIT,
        ids::CODE_CONCURRENCY_EXCEEDS_LIMIT,
        ids::CODE_RATE_EXCEEDS_LIMIT,
        ids::CODE_TTL_NOT_POSITIVE,
        ids::CODE_BASE64_PAYLOAD,
        ids::CODE_URL_ENCODED_PAYLOAD,
        ids::CODE_DATA_URI_PAYLOAD,
    ]
}

// --- Predicate-level explanations ---

fn explain_pause_before_propagate() -> Explanation {
    Explanation {
        title: "Pause Before Propagate",
        description: "\
Requires the caller to attest that it paused for review before issuing the request.

Propagation, replication, and outbound contact all create load on the network.
An agent that fires them without a review pause is exactly the runaway behavior
the gate exists to stop, so a missing or false attestation is always denied.",
        remediation: "\
Insert the review pause in the agent loop, then set `pauseBeforePropagate` to
`true` on the request. Do not set the flag without actually pausing.",
        examples: ExamplePair {
            before: r#"{ "intent": "creative", "pauseBeforePropagate": false }"#,
            after: r#"{ "intent": "creative", "pauseBeforePropagate": true }"#,
        },
    }
}

fn explain_intent_allowed() -> Explanation {
    Explanation {
        title: "Wholesome Intent",
        description: "\
The request's declared `intent` must appear in the policy's `wholesome_intents`
allowlist.

Matching is exact and case-sensitive: `Creative` does not match `creative`.",
        remediation: "\
Declare one of the allowlisted intents, or have the policy owner add the new
intent to `wholesome_intents` after review.",
        examples: ExamplePair {
            before: r#"{ "intent": "exfiltrate" }"#,
            after: r#"{ "intent": "creative" }"#,
        },
    }
}

fn explain_domain_allowed() -> Explanation {
    Explanation {
        title: "Safe Domain",
        description: "\
The request's target `domain` must appear in the policy's `safe_domains`
allowlist.

Matching is exact, byte-for-byte. No case folding, punycode conversion, or
wildcard expansion is performed. A look-alike domain that differs from an
allowlisted entry by a single code point (for example `githüb.com`) is denied.",
        remediation: "\
Target an allowlisted domain exactly as written in the policy, or request that
the domain be added to `safe_domains`.",
        examples: ExamplePair {
            before: r#"{ "domain": "githüb.com" }"#,
            after: r#"{ "domain": "github.com" }"#,
        },
    }
}

fn explain_ttl_limit() -> Explanation {
    Explanation {
        title: "TTL Within Limit",
        description: "\
The remaining hop budget `ttl` must be less than or equal to `limits.max_ttl`.

A TTL above the limit would let the action propagate further than the policy
allows.",
        remediation: "\
Lower the request's `ttl` to at most `max_ttl`.",
        examples: ExamplePair {
            before: r#"{ "ttl": 4 }"#,
            after: r#"{ "ttl": 3 }"#,
        },
    }
}

fn explain_children_limit() -> Explanation {
    Explanation {
        title: "Children Within Limit",
        description: "\
The number of child actions or agents the request would spawn must be less
than or equal to `limits.max_children`.",
        remediation: "\
Spawn fewer children per action, or split the work across separately admitted
requests.",
        examples: ExamplePair {
            before: r#"{ "children": 6 }"#,
            after: r#"{ "children": 5 }"#,
        },
    }
}

fn explain_concurrency_limit() -> Explanation {
    Explanation {
        title: "Concurrency Within Limit",
        description: "\
The number of concurrent operations the request needs must be less than or
equal to `limits.max_concurrency`.",
        remediation: "\
Reduce the requested concurrency.",
        examples: ExamplePair {
            before: r#"{ "concurrency": 3 }"#,
            after: r#"{ "concurrency": 2 }"#,
        },
    }
}

fn explain_rate_limit() -> Explanation {
    Explanation {
        title: "Rate Within Limit",
        description: "\
The requested rate (actions per minute) must be less than or equal to
`limits.max_rate_per_minute`.

The gate does not measure rates itself. The caller supplies the figure.",
        remediation: "\
Throttle the action so the declared rate is at or below the limit.",
        examples: ExamplePair {
            before: r#"{ "rate": 31 }"#,
            after: r#"{ "rate": 30 }"#,
        },
    }
}

fn explain_ttl_positive() -> Explanation {
    Explanation {
        title: "TTL Positive",
        description: "\
The remaining hop budget `ttl` must be strictly greater than zero.

An action with no hops left must not propagate, regardless of `max_ttl`.",
        remediation: "\
Stop propagating once the TTL is exhausted. Never reset or negate it.",
        examples: ExamplePair {
            before: r#"{ "ttl": 0 }"#,
            after: r#"{ "ttl": 1 }"#,
        },
    }
}

fn explain_not_encoded_payload() -> Explanation {
    Explanation {
        title: "No Encoded Payload",
        description: "\
When `enforce_encoded_payload` is enabled, payloads that look encoded are denied.

Three heuristics are applied to non-blank payloads; any one of them flags it:
- base64-like: the whole payload is 4+ characters from `[A-Za-z0-9+/]` with up
  to two `=` padding characters. Plain alphanumeric words of 4+ characters
  also match.
- URL-encoded: the payload contains `%` followed by two hex digits anywhere.
- data URI: the payload starts with `data:`.

Empty or whitespace-only payloads are never inspected. With the flag disabled
this predicate always passes.",
        remediation: "\
Send payloads as plain, reviewable text. If a payload must carry binary data,
route it through a channel that is not gated by this policy.",
        examples: ExamplePair {
            before: r#"{ "payload": "aGVsbG8gd29ybGQ=" }"#,
            after: r#"{ "payload": "hello world" }"#,
        },
    }
}

// --- Code-level explanations ---

fn explain_base64_payload() -> Explanation {
    let mut exp = explain_not_encoded_payload();
    exp.title = "Base64-like Payload";
    exp
}

fn explain_url_encoded_payload() -> Explanation {
    let mut exp = explain_not_encoded_payload();
    exp.title = "URL-encoded Payload";
    exp.examples = ExamplePair {
        before: r#"{ "payload": "test%20string" }"#,
        after: r#"{ "payload": "test string" }"#,
    };
    exp
}

fn explain_data_uri_payload() -> Explanation {
    let mut exp = explain_not_encoded_payload();
    exp.title = "Data URI Payload";
    exp.examples = ExamplePair {
        before: r#"{ "payload": "data:text/plain;base64,SGk=" }"#,
        after: r#"{ "payload": "Hi there" }"#,
    };
    exp
}

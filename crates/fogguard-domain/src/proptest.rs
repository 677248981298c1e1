//! Property-based tests for the admission engine.
//!
//! These tests use proptest to verify invariants around:
//! - Determinism and default-deny composition
//! - Boundary behavior of the inclusive limits
//! - Independence of the encoded-payload flag from the other predicates

use crate::engine::{evaluate, is_allowed};
use crate::model::Request;
use crate::payload::{detect_encoding, is_encoded_payload};
use crate::policy::{Limits, PolicyConfig};
use crate::predicates::PREDICATES;
use crate::test_support::{default_config, happy_request};
use fogguard_types::ids;
use proptest::prelude::*;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Intents drawn mostly from the default allowlist, with a few near misses.
fn arb_intent() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("creative".to_string()),
        Just("research".to_string()),
        Just("Creative".to_string()),
        Just("exfiltrate".to_string()),
        "[a-z]{0,12}",
    ]
}

fn arb_domain() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("github.com".to_string()),
        Just("arxiv.org".to_string()),
        Just("githüb.com".to_string()),
        Just("github.com.evil".to_string()),
        "[a-z]{1,8}\\.(com|org|net)",
    ]
}

fn arb_payload() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        Just(Some("aGVsbG8gd29ybGQ=".to_string())),
        Just(Some("test%20string".to_string())),
        Just(Some("data:text/plain;base64,SGk=".to_string())),
        any::<String>().prop_map(Some),
    ]
}

fn arb_request() -> impl Strategy<Value = Request> {
    (
        arb_intent(),
        arb_domain(),
        -2i64..6,
        -1i64..8,
        -1i64..4,
        -1.0f64..40.0,
        arb_payload(),
        any::<bool>(),
    )
        .prop_map(
            |(intent, domain, ttl, children, concurrency, rate, payload, pause)| Request {
                intent,
                domain,
                ttl,
                children,
                concurrency,
                rate,
                payload,
                pause_before_propagate: pause,
            },
        )
}

fn arb_limits() -> impl Strategy<Value = Limits> {
    (0i64..6, 0i64..8, 0i64..4, 0.0f64..40.0).prop_map(
        |(max_ttl, max_children, max_concurrency, max_rate_per_minute)| Limits {
            max_ttl,
            max_children,
            max_concurrency,
            max_rate_per_minute,
        },
    )
}

fn arb_config() -> impl Strategy<Value = PolicyConfig> {
    (arb_limits(), any::<bool>()).prop_map(|(limits, enforce_encoded_payload)| PolicyConfig {
        limits,
        enforce_encoded_payload,
        ..default_config()
    })
}

// ============================================================================
// Composition properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn evaluation_is_deterministic(req in arb_request(), cfg in arb_config()) {
        let a = evaluate(&req, &cfg);
        let b = evaluate(&req, &cfg);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn allow_iff_no_failures(req in arb_request(), cfg in arb_config()) {
        let decision = evaluate(&req, &cfg);
        prop_assert_eq!(decision.allow, decision.failed_predicates.is_empty());
        prop_assert_eq!(decision.failed_predicates.len(), decision.findings.len());
        prop_assert_eq!(decision.predicates_evaluated as usize, PREDICATES.len());
    }

    #[test]
    fn short_circuit_agrees_with_full_evaluation(req in arb_request(), cfg in arb_config()) {
        prop_assert_eq!(is_allowed(&req, &cfg), evaluate(&req, &cfg).allow);
    }

    #[test]
    fn failures_follow_predicate_order(req in arb_request(), cfg in arb_config()) {
        let decision = evaluate(&req, &cfg);
        let positions: Vec<usize> = decision
            .failed_predicates
            .iter()
            .map(|id| ids::PREDICATE_ORDER.iter().position(|p| p == id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn findings_pair_with_failed_predicates(req in arb_request(), cfg in arb_config()) {
        let decision = evaluate(&req, &cfg);
        for (id, finding) in decision.failed_predicates.iter().zip(&decision.findings) {
            prop_assert_eq!(*id, finding.predicate.as_str());
            prop_assert!(finding.fingerprint.is_some());
        }
    }

    #[test]
    fn paused_false_is_always_denied(req in arb_request(), cfg in arb_config()) {
        let req = Request { pause_before_propagate: false, ..req };
        let decision = evaluate(&req, &cfg);
        prop_assert!(!decision.allow);
        prop_assert_eq!(decision.failed_predicates[0], ids::PREDICATE_PAUSE_BEFORE_PROPAGATE);
    }

    #[test]
    fn non_positive_ttl_is_always_denied(ttl in -100i64..=0, cfg in arb_config()) {
        let req = Request { ttl, ..happy_request() };
        let decision = evaluate(&req, &cfg);
        prop_assert!(decision.failed(ids::PREDICATE_TTL_POSITIVE));
        prop_assert!(!decision.allow);
    }
}

// ============================================================================
// Limit boundaries
// ============================================================================

proptest! {
    #[test]
    fn values_at_a_limit_pass_and_one_above_fails(limits in arb_limits()) {
        let cfg = PolicyConfig { limits: limits.clone(), ..default_config() };
        let at = Request {
            ttl: limits.max_ttl.max(1),
            children: limits.max_children,
            concurrency: limits.max_concurrency,
            rate: limits.max_rate_per_minute,
            ..happy_request()
        };
        let decision = evaluate(&at, &cfg);
        prop_assert!(!decision.failed(ids::PREDICATE_WITHIN_LIMITS_CHILDREN));
        prop_assert!(!decision.failed(ids::PREDICATE_WITHIN_LIMITS_CONCURRENCY));
        prop_assert!(!decision.failed(ids::PREDICATE_WITHIN_LIMITS_RATE));

        let above = Request {
            ttl: limits.max_ttl + 1,
            children: limits.max_children + 1,
            concurrency: limits.max_concurrency + 1,
            rate: limits.max_rate_per_minute + 1.0,
            ..happy_request()
        };
        let decision = evaluate(&above, &cfg);
        prop_assert!(decision.failed(ids::PREDICATE_WITHIN_LIMITS_TTL));
        prop_assert!(decision.failed(ids::PREDICATE_WITHIN_LIMITS_CHILDREN));
        prop_assert!(decision.failed(ids::PREDICATE_WITHIN_LIMITS_CONCURRENCY));
        prop_assert!(decision.failed(ids::PREDICATE_WITHIN_LIMITS_RATE));
    }

    #[test]
    fn lowering_a_value_never_adds_a_limit_failure(req in arb_request(), cfg in arb_config()) {
        let lowered = Request {
            children: req.children - 1,
            concurrency: req.concurrency - 1,
            rate: req.rate - 1.0,
            ..req.clone()
        };
        let before = evaluate(&req, &cfg);
        let after = evaluate(&lowered, &cfg);
        for id in [
            ids::PREDICATE_WITHIN_LIMITS_CHILDREN,
            ids::PREDICATE_WITHIN_LIMITS_CONCURRENCY,
            ids::PREDICATE_WITHIN_LIMITS_RATE,
        ] {
            prop_assert!(!after.failed(id) || before.failed(id), "{} newly failed", id);
        }
    }
}

// ============================================================================
// Encoded payload flag
// ============================================================================

proptest! {
    #[test]
    fn flag_off_never_fails_payload_check(req in arb_request(), cfg in arb_config()) {
        let cfg = PolicyConfig { enforce_encoded_payload: false, ..cfg };
        prop_assert!(!evaluate(&req, &cfg).failed(ids::PREDICATE_NOT_ENCODED_PAYLOAD));
    }

    #[test]
    fn flag_does_not_affect_other_predicates(req in arb_request(), cfg in arb_config()) {
        let off = evaluate(&req, &PolicyConfig { enforce_encoded_payload: false, ..cfg.clone() });
        let on = evaluate(&req, &PolicyConfig { enforce_encoded_payload: true, ..cfg });
        let strip = |failed: &[&'static str]| -> Vec<&'static str> {
            failed.iter()
                .copied()
                .filter(|id| *id != ids::PREDICATE_NOT_ENCODED_PAYLOAD)
                .collect()
        };
        prop_assert_eq!(strip(&off.failed_predicates), strip(&on.failed_predicates));
    }

    #[test]
    fn detector_signals_agree_with_boolean(payload in any::<String>()) {
        prop_assert_eq!(is_encoded_payload(&payload), detect_encoding(&payload).any());
    }

    #[test]
    fn whitespace_only_payloads_pass_with_flag_on(ws in "[ \t\r\n]{0,8}") {
        let cfg = PolicyConfig { enforce_encoded_payload: true, ..default_config() };
        let req = Request { payload: Some(ws), ..happy_request() };
        prop_assert!(evaluate(&req, &cfg).allow);
    }
}

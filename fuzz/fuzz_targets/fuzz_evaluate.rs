//! Structured fuzz target for the decision engine.
//!
//! Builds requests with `arbitrary` and checks the engine's ordering and
//! default-deny properties against the default preset.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_evaluate
//! ```

#![no_main]

use arbitrary::Arbitrary;
use fogguard_domain::{Request, evaluate, is_allowed};
use fogguard_settings::{FeatureFlags, PRESET_DEFAULT, resolve_preset};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FuzzRequest {
    intent: String,
    domain: String,
    ttl: i64,
    children: i64,
    concurrency: i64,
    rate: f64,
    payload: Option<String>,
    pause_before_propagate: bool,
    enforce_encoded_payload: bool,
}

fuzz_target!(|input: FuzzRequest| {
    let flags = FeatureFlags {
        enforce_encoded_payload: Some(input.enforce_encoded_payload),
    };
    let Ok(resolved) = resolve_preset(PRESET_DEFAULT, &flags) else {
        return;
    };
    let cfg = resolved.config;

    let req = Request {
        intent: input.intent,
        domain: input.domain,
        ttl: input.ttl,
        children: input.children,
        concurrency: input.concurrency,
        rate: input.rate,
        payload: input.payload,
        pause_before_propagate: input.pause_before_propagate,
    };

    let decision = evaluate(&req, &cfg);
    assert_eq!(decision.allow, decision.failed_predicates.is_empty());
    assert_eq!(decision.allow, is_allowed(&req, &cfg));
    if !req.pause_before_propagate || req.ttl <= 0 {
        assert!(!decision.allow);
    }

    let positions: Vec<usize> = decision
        .failed_predicates
        .iter()
        .filter_map(|id| {
            fogguard_domain::predicates::PREDICATES
                .iter()
                .position(|p| p.id == *id)
        })
        .collect();
    assert_eq!(positions.len(), decision.failed_predicates.len());
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
});

//! Fuzz target for request decoding and evaluation.
//!
//! Goal: arbitrary request bodies either fail validation or produce a
//! decision. Neither path may panic.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_request_json
//! ```

#![no_main]

use fogguard_domain::{Request, evaluate};
use fogguard_settings::{FeatureFlags, preset_names, resolve_preset};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(Ok(req)) = Request::from_json_str(text) else {
        return;
    };

    let flags = FeatureFlags::default();
    for name in preset_names() {
        let Ok(resolved) = resolve_preset(name, &flags) else {
            continue;
        };
        let decision = evaluate(&req, &resolved.config);
        assert_eq!(decision.allow, decision.failed_predicates.is_empty());
        assert_eq!(decision.failed_predicates.len(), decision.findings.len());
    }
});

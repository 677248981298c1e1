//! Fuzz target for policy file parsing and resolution.
//!
//! Goal: The parser and resolver should **never panic** on any input.
//! They may return errors, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_policy_parser
//! ```

#![no_main]

use fogguard_settings::{FeatureFlags, PolicyFormat, load_policy};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let flags = FeatureFlags::default();
    for format in [PolicyFormat::Toml, PolicyFormat::Json] {
        if let Ok(resolved) = load_policy(text, format, &flags) {
            let limits = &resolved.config.limits;
            assert!(limits.max_ttl >= 0);
            assert!(limits.max_children >= 0);
            assert!(limits.max_concurrency >= 0);
            assert!(limits.max_rate_per_minute >= 0.0);
        }
    }
});

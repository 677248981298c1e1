//! Fuzz target for the encoded-payload heuristics.
//!
//! The boolean detector and the per-heuristic signals must always agree,
//! and a flagged payload must always name a finding code.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_encoded_payload
//! ```

#![no_main]

use fogguard_domain::payload::{detect_encoding, is_encoded_payload};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|payload: &str| {
    let signals = detect_encoding(payload);
    assert_eq!(signals.any(), is_encoded_payload(payload));
    assert_eq!(signals.any(), signals.primary_code().is_some());
    assert_eq!(signals.any(), !signals.fired().is_empty());
});

//! Stable DTOs and IDs used across the fogguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted decision receipt
//! - stable string IDs for predicates and finding codes
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod receipt;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use receipt::{
    DecisionData, DecisionReceipt, Finding, SCHEMA_DECISION_V1, SCHEMA_POLICY_V1, ToolMeta,
    Verdict,
};

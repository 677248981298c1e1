use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

/// Stable schema identifier for decision receipts.
pub const SCHEMA_DECISION_V1: &str = "fogguard.decision.v1";

/// Stable schema identifier for policy files.
pub const SCHEMA_POLICY_V1: &str = "fogguard.policy.v1";

/// Admission outcome. There is no third state: errors never become a verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Allow,
    Deny,
}

impl Verdict {
    pub fn from_allow(allow: bool) -> Self {
        if allow { Verdict::Allow } else { Verdict::Deny }
    }

    pub fn is_allow(self) -> bool {
        matches!(self, Verdict::Allow)
    }
}

/// One failed predicate, with enough context to explain the denial.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub predicate: String,
    pub code: String,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Stable identifier intended for dedup and trending. A hash of:
    /// `predicate + code + salient request values`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    /// Predicate-specific structured payload (kept open-ended for forward compatibility).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: JsonValue,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Fogguard-specific summary payload for the receipt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct DecisionData {
    /// Display name of the policy that was applied.
    pub policy: String,
    /// Preset the policy inherited from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    pub enforce_encoded_payload: bool,
    pub predicates_evaluated: u32,
}

/// The receipt emitted for one admission decision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DecisionReceipt {
    /// Versioned schema identifier for the receipt shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub allow: bool,
    /// Predicate IDs that evaluated false, in evaluation order.
    pub failed_predicates: Vec<String>,
    pub findings: Vec<Finding>,
    pub data: DecisionData,
}

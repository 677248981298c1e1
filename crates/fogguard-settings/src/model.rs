use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Policy file schema v1 (`fogguard.policy.v1`).
///
/// This is a *user-facing* model: every section is optional here so that a file can
/// inherit from a preset. Required-ness is enforced during resolution.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyFileV1 {
    /// Optional schema string for tooling (`fogguard.policy.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Display name reported in decisions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Preset to inherit omitted sections from: `default` or `strict`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Exact-match allowlist of declared intents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wholesome_intents: Option<Vec<String>>,

    /// Exact-match allowlist of target domains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_domains: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<LimitsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<FeaturesConfig>,
}

/// Inclusive upper bounds. All four keys are required unless a `profile` supplies them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LimitsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_ttl: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_children: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rate_per_minute: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FeaturesConfig {
    /// Deny payloads that look base64-, URL-, or data-URI-encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce_encoded_payload: Option<bool>,
}

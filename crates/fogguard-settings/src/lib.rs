//! Policy-file parsing and preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves policies provided as strings.

#![forbid(unsafe_code)]

mod error;
mod model;
mod presets;
mod resolve;

pub use error::ConfigError;
pub use model::{FeaturesConfig, LimitsConfig, PolicyFileV1};
pub use presets::{PRESET_DEFAULT, PRESET_STRICT, preset_names};
pub use resolve::{FeatureFlags, ResolvedPolicy, resolve_policy, resolve_preset};

/// On-disk encoding of a policy file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyFormat {
    Toml,
    Json,
}

impl PolicyFormat {
    /// JSON when the file name ends in `.json`, TOML otherwise.
    pub fn from_file_name(name: &str) -> Self {
        if name.to_ascii_lowercase().ends_with(".json") {
            PolicyFormat::Json
        } else {
            PolicyFormat::Toml
        }
    }
}

/// Parse a `fogguard.toml` policy (or equivalent) into a typed model.
pub fn parse_policy_toml(input: &str) -> Result<PolicyFileV1, ConfigError> {
    toml::from_str(input).map_err(|e| ConfigError::Parse {
        format: "TOML",
        message: e.to_string(),
    })
}

/// Parse a JSON policy into the same model as [`parse_policy_toml`].
pub fn parse_policy_json(input: &str) -> Result<PolicyFileV1, ConfigError> {
    serde_json::from_str(input).map_err(|e| ConfigError::Parse {
        format: "JSON",
        message: e.to_string(),
    })
}

pub fn parse_policy(input: &str, format: PolicyFormat) -> Result<PolicyFileV1, ConfigError> {
    match format {
        PolicyFormat::Toml => parse_policy_toml(input),
        PolicyFormat::Json => parse_policy_json(input),
    }
}

/// Parse and resolve in one step.
pub fn load_policy(
    input: &str,
    format: PolicyFormat,
    flags: &FeatureFlags,
) -> Result<ResolvedPolicy, ConfigError> {
    resolve_policy(parse_policy(input, format)?, flags)
}

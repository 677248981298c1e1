use crate::error::ConfigError;
use crate::model::{LimitsConfig, PolicyFileV1};
use crate::presets;
use fogguard_domain::{Limits, PolicyConfig};
use fogguard_types::SCHEMA_POLICY_V1;
use serde_json::Value;

const FLAG_ENFORCE_ENCODED_PAYLOAD: &str = "enforce_encoded_payload";
const FLAG_ENFORCE_ENCODED_PAYLOAD_CAMEL: &str = "enforceEncodedPayload";

/// Feature flags supplied at invocation time. Applied after the file or preset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    pub enforce_encoded_payload: Option<bool>,
}

impl FeatureFlags {
    /// Parse a JSON object of flags. Unknown flags are ignored.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let value: Value =
            serde_json::from_str(input).map_err(|e| ConfigError::InvalidFeatureFlags {
                message: e.to_string(),
            })?;
        let obj = value
            .as_object()
            .ok_or_else(|| ConfigError::InvalidFeatureFlags {
                message: "expected a JSON object".to_string(),
            })?;

        let mut flags = FeatureFlags::default();
        for key in [FLAG_ENFORCE_ENCODED_PAYLOAD, FLAG_ENFORCE_ENCODED_PAYLOAD_CAMEL] {
            if let Some(v) = obj.get(key) {
                let b = v.as_bool().ok_or_else(|| ConfigError::InvalidFeatureFlags {
                    message: format!("`{key}` must be a boolean"),
                })?;
                if flags.enforce_encoded_payload.is_some_and(|prev| prev != b) {
                    return Err(ConfigError::InvalidFeatureFlags {
                        message: format!(
                            "`{FLAG_ENFORCE_ENCODED_PAYLOAD}` and `{FLAG_ENFORCE_ENCODED_PAYLOAD_CAMEL}` disagree"
                        ),
                    });
                }
                flags.enforce_encoded_payload = Some(b);
            }
        }
        Ok(flags)
    }

    fn apply(&self, cfg: &mut PolicyConfig) {
        if let Some(v) = self.enforce_encoded_payload {
            cfg.enforce_encoded_payload = v;
        }
    }
}

/// A validated, immutable policy ready for evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedPolicy {
    /// Display name: the file's `name`, else its profile, else `custom`.
    pub name: String,
    pub profile: Option<String>,
    pub config: PolicyConfig,
}

pub fn resolve_preset(name: &str, flags: &FeatureFlags) -> Result<ResolvedPolicy, ConfigError> {
    let mut config = lookup_preset(name)?;
    flags.apply(&mut config);
    Ok(ResolvedPolicy {
        name: name.to_string(),
        profile: Some(name.to_string()),
        config,
    })
}

pub fn resolve_policy(
    file: PolicyFileV1,
    flags: &FeatureFlags,
) -> Result<ResolvedPolicy, ConfigError> {
    if let Some(schema) = file.schema.as_deref()
        && schema != SCHEMA_POLICY_V1
    {
        return Err(ConfigError::UnsupportedSchema {
            found: schema.to_string(),
            expected: SCHEMA_POLICY_V1,
        });
    }

    let base = match file.profile.as_deref() {
        Some(profile) => Some(lookup_preset(profile)?),
        None => None,
    };

    let wholesome_intents = match (file.wholesome_intents, &base) {
        (Some(list), _) => list.into_iter().collect(),
        (None, Some(base)) => base.wholesome_intents.clone(),
        (None, None) => {
            return Err(ConfigError::MissingSection {
                section: "wholesome_intents",
            });
        }
    };

    let safe_domains = match (file.safe_domains, &base) {
        (Some(list), _) => list.into_iter().collect(),
        (None, Some(base)) => base.safe_domains.clone(),
        (None, None) => {
            return Err(ConfigError::MissingSection {
                section: "safe_domains",
            });
        }
    };

    let limits = match (file.limits, &base) {
        (Some(limits), base) => resolve_limits(&limits, base.as_ref().map(|b| &b.limits))?,
        (None, Some(base)) => base.limits.clone(),
        (None, None) => return Err(ConfigError::MissingSection { section: "limits" }),
    };
    validate_limits(&limits)?;

    let enforce_encoded_payload = file
        .features
        .and_then(|f| f.enforce_encoded_payload)
        .or(base.as_ref().map(|b| b.enforce_encoded_payload))
        .unwrap_or(false);

    let mut config = PolicyConfig {
        wholesome_intents,
        safe_domains,
        limits,
        enforce_encoded_payload,
    };
    flags.apply(&mut config);

    let name = file
        .name
        .or_else(|| file.profile.clone())
        .unwrap_or_else(|| "custom".to_string());

    Ok(ResolvedPolicy {
        name,
        profile: file.profile,
        config,
    })
}

fn lookup_preset(name: &str) -> Result<PolicyConfig, ConfigError> {
    presets::preset(name).ok_or_else(|| ConfigError::UnknownProfile {
        name: name.to_string(),
        known: presets::preset_names().join(", "),
    })
}

/// Keys omitted from `[limits]` fall back to the inherited preset, when there is one.
fn resolve_limits(cfg: &LimitsConfig, base: Option<&Limits>) -> Result<Limits, ConfigError> {
    fn pick<T: Copy>(
        value: Option<T>,
        inherited: Option<T>,
        field: &'static str,
    ) -> Result<T, ConfigError> {
        value.or(inherited).ok_or(ConfigError::MissingField {
            section: "limits",
            field,
        })
    }

    Ok(Limits {
        max_ttl: pick(cfg.max_ttl, base.map(|b| b.max_ttl), "max_ttl")?,
        max_children: pick(cfg.max_children, base.map(|b| b.max_children), "max_children")?,
        max_concurrency: pick(
            cfg.max_concurrency,
            base.map(|b| b.max_concurrency),
            "max_concurrency",
        )?,
        max_rate_per_minute: pick(
            cfg.max_rate_per_minute,
            base.map(|b| b.max_rate_per_minute),
            "max_rate_per_minute",
        )?,
    })
}

fn validate_limits(limits: &Limits) -> Result<(), ConfigError> {
    for (field, value) in [
        ("max_ttl", limits.max_ttl),
        ("max_children", limits.max_children),
        ("max_concurrency", limits.max_concurrency),
    ] {
        if value < 0 {
            return Err(ConfigError::InvalidLimit {
                field,
                reason: format!("must not be negative, got {value}"),
            });
        }
    }

    let rate = limits.max_rate_per_minute;
    if !rate.is_finite() {
        return Err(ConfigError::InvalidLimit {
            field: "max_rate_per_minute",
            reason: format!("must be a finite number, got {rate}"),
        });
    }
    if rate < 0.0 {
        return Err(ConfigError::InvalidLimit {
            field: "max_rate_per_minute",
            reason: format!("must not be negative, got {rate}"),
        });
    }
    Ok(())
}

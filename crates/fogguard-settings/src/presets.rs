use fogguard_domain::{Limits, PolicyConfig};

pub const PRESET_DEFAULT: &str = "default";
pub const PRESET_STRICT: &str = "strict";

/// Names accepted by `--policy <name>` and the `profile` key.
pub fn preset_names() -> &'static [&'static str] {
    &[PRESET_DEFAULT, PRESET_STRICT]
}

/// Preset policies are opinionated defaults.
///
/// Keep these small and readable. Anything site-specific belongs in a policy file.
pub fn preset(profile: &str) -> Option<PolicyConfig> {
    match profile {
        PRESET_DEFAULT => Some(default_profile()),
        PRESET_STRICT => Some(strict_profile()),
        _ => None,
    }
}

fn default_profile() -> PolicyConfig {
    PolicyConfig {
        wholesome_intents: default_intents(),
        safe_domains: default_domains(),
        limits: Limits {
            max_ttl: 3,
            max_children: 5,
            max_concurrency: 2,
            max_rate_per_minute: 30.0,
        },
        enforce_encoded_payload: false,
    }
}

fn strict_profile() -> PolicyConfig {
    PolicyConfig {
        wholesome_intents: default_intents(),
        safe_domains: default_domains(),
        limits: Limits {
            max_ttl: 2,
            max_children: 3,
            max_concurrency: 1,
            max_rate_per_minute: 10.0,
        },
        enforce_encoded_payload: true,
    }
}

fn default_intents() -> std::collections::BTreeSet<String> {
    ["creative", "educational", "research", "maintenance"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn default_domains() -> std::collections::BTreeSet<String> {
    ["github.com", "wikipedia.org", "arxiv.org"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

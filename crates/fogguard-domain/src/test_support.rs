use crate::model::Request;
use crate::policy::{Limits, PolicyConfig};

pub fn default_limits() -> Limits {
    Limits {
        max_ttl: 3,
        max_children: 5,
        max_concurrency: 2,
        max_rate_per_minute: 30.0,
    }
}

pub fn default_config() -> PolicyConfig {
    PolicyConfig {
        wholesome_intents: ["creative", "educational", "research", "maintenance"]
            .into_iter()
            .map(str::to_string)
            .collect(),
        safe_domains: ["github.com", "wikipedia.org", "arxiv.org"]
            .into_iter()
            .map(str::to_string)
            .collect(),
        limits: default_limits(),
        enforce_encoded_payload: false,
    }
}

pub fn config_with_flag(enforce_encoded_payload: bool) -> PolicyConfig {
    PolicyConfig {
        enforce_encoded_payload,
        ..default_config()
    }
}

/// Every value sits exactly at the default limit.
pub fn happy_request() -> Request {
    Request {
        intent: "creative".to_string(),
        domain: "github.com".to_string(),
        ttl: 3,
        children: 5,
        concurrency: 2,
        rate: 30.0,
        payload: None,
        pause_before_propagate: true,
    }
}

pub fn request_with_payload(payload: &str) -> Request {
    Request {
        payload: Some(payload.to_string()),
        ..happy_request()
    }
}

use thiserror::Error;

/// A policy that cannot be loaded. Always distinct from a deny decision.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("failed to parse policy {format}: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("unsupported policy schema `{found}` (expected `{expected}`)")]
    UnsupportedSchema {
        found: String,
        expected: &'static str,
    },

    #[error("unknown profile `{name}` (expected one of: {known})")]
    UnknownProfile { name: String, known: String },

    #[error("policy is missing required section `{section}`")]
    MissingSection { section: &'static str },

    #[error("policy section `{section}` is missing required key `{field}`")]
    MissingField {
        section: &'static str,
        field: &'static str,
    },

    #[error("invalid limit `{field}`: {reason}")]
    InvalidLimit { field: &'static str, reason: String },

    #[error("invalid feature flags: {message}")]
    InvalidFeatureFlags { message: String },
}

//! The `check` use case: resolve a policy, validate a request, and decide.

use fogguard_domain::{InputError, Request};
use fogguard_settings::{ConfigError, FeatureFlags, PolicyFormat, ResolvedPolicy};
use fogguard_types::{DecisionReceipt, Verdict};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::report::build_receipt;

/// Exit code for any input, configuration, or IO failure.
pub const EXIT_ERROR: i32 = 1;

/// Where the policy comes from.
#[derive(Clone, Copy, Debug)]
pub enum PolicySource<'a> {
    /// A built-in preset, by name.
    Preset(&'a str),
    /// Policy file contents.
    Text { text: &'a str, format: PolicyFormat },
}

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    pub policy: PolicySource<'a>,
    /// Request body as JSON text.
    pub request_json: &'a str,
    /// Optional feature-flag overrides as a JSON object.
    pub feature_flags: Option<&'a str>,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub receipt: DecisionReceipt,
    /// The resolved policy the decision was made against.
    pub policy: ResolvedPolicy,
}

/// A check that could not reach a decision.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("request is empty")]
    EmptyRequest,

    #[error("request is not valid JSON: {0}")]
    RequestSyntax(#[source] serde_json::Error),

    #[error("invalid request: {0}")]
    Input(#[from] InputError),

    #[error("invalid policy: {0}")]
    Config(#[from] ConfigError),
}

impl CheckError {
    /// The caller sent a bad request.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            CheckError::EmptyRequest | CheckError::RequestSyntax(_) | CheckError::Input(_)
        )
    }

    /// The policy or flags could not be loaded.
    pub fn is_config(&self) -> bool {
        matches!(self, CheckError::Config(_))
    }
}

/// Run the check use case: resolve policy, validate request, evaluate, build receipt.
///
/// The policy is resolved before the request is read, so a broken policy is reported
/// even when the request is also malformed.
pub fn run_check(input: CheckInput<'_>) -> Result<CheckOutput, CheckError> {
    let started_at = OffsetDateTime::now_utc();

    let flags = match input.feature_flags {
        Some(text) if !text.trim().is_empty() => FeatureFlags::from_json_str(text)?,
        _ => FeatureFlags::default(),
    };

    let policy = match input.policy {
        PolicySource::Preset(name) => fogguard_settings::resolve_preset(name, &flags)?,
        PolicySource::Text { text, format } => {
            fogguard_settings::load_policy(text, format, &flags)?
        }
    };
    debug!(
        policy = %policy.name,
        profile = ?policy.profile,
        enforce_encoded_payload = policy.config.enforce_encoded_payload,
        "resolved policy"
    );

    let request = parse_request(input.request_json)?;

    let decision = fogguard_domain::evaluate(&request, &policy.config);
    for finding in &decision.findings {
        debug!(
            predicate = %finding.predicate,
            code = %finding.code,
            "predicate failed: {}",
            finding.message
        );
    }
    info!(
        verdict = ?decision.verdict(),
        failed = decision.failed_predicates.len(),
        policy = %policy.name,
        "admission decided"
    );

    let finished_at = OffsetDateTime::now_utc();
    let receipt = build_receipt(decision, &policy, started_at, finished_at);

    Ok(CheckOutput { receipt, policy })
}

fn parse_request(text: &str) -> Result<Request, CheckError> {
    if text.trim().is_empty() {
        return Err(CheckError::EmptyRequest);
    }
    let request = Request::from_json_str(text).map_err(CheckError::RequestSyntax)??;
    Ok(request)
}

/// Map verdict to exit code: 0 = allow, 2 = deny.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Allow => 0,
        Verdict::Deny => 2,
    }
}

use anyhow::Context;
use fogguard_domain::Decision;
use fogguard_render::{RenderableData, RenderableFinding, RenderableReport, RenderableVerdict};
use fogguard_settings::ResolvedPolicy;
use fogguard_types::{
    DecisionData, DecisionReceipt, SCHEMA_DECISION_V1, ToolMeta, Verdict,
};
use time::OffsetDateTime;

/// Wrap a domain decision in the versioned receipt envelope.
pub fn build_receipt(
    decision: Decision,
    policy: &ResolvedPolicy,
    started_at: OffsetDateTime,
    finished_at: OffsetDateTime,
) -> DecisionReceipt {
    let verdict = decision.verdict();
    let Decision {
        allow,
        failed_predicates,
        findings,
        predicates_evaluated,
    } = decision;

    DecisionReceipt {
        schema: SCHEMA_DECISION_V1.to_string(),
        tool: ToolMeta {
            name: "fogguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        verdict,
        allow,
        failed_predicates: failed_predicates.into_iter().map(str::to_string).collect(),
        findings,
        data: DecisionData {
            policy: policy.name.clone(),
            profile: policy.profile.clone(),
            enforce_encoded_payload: policy.config.enforce_encoded_payload,
            predicates_evaluated,
        },
    }
}

pub fn serialize_receipt(receipt: &DecisionReceipt) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(receipt).context("serialize decision receipt")
}

pub fn to_renderable(receipt: &DecisionReceipt) -> RenderableReport {
    RenderableReport {
        verdict: match receipt.verdict {
            Verdict::Allow => RenderableVerdict::Allow,
            Verdict::Deny => RenderableVerdict::Deny,
        },
        failed_predicates: receipt.failed_predicates.clone(),
        findings: receipt
            .findings
            .iter()
            .map(|f| RenderableFinding {
                predicate: f.predicate.clone(),
                code: f.code.clone(),
                message: f.message.clone(),
                help: f.help.clone(),
            })
            .collect(),
        data: RenderableData {
            policy: receipt.data.policy.clone(),
            profile: receipt.data.profile.clone(),
            enforce_encoded_payload: receipt.data.enforce_encoded_payload,
            predicates_evaluated: receipt.data.predicates_evaluated,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fogguard_domain::Request;
    use fogguard_settings::{FeatureFlags, resolve_preset};
    use time::macros::datetime;

    fn denied_receipt() -> DecisionReceipt {
        let policy = resolve_preset("default", &FeatureFlags::default()).expect("preset");
        let request = Request {
            intent: "creative".to_string(),
            domain: "github.com".to_string(),
            ttl: 0,
            children: 6,
            concurrency: 1,
            rate: 1.0,
            payload: None,
            pause_before_propagate: true,
        };
        let decision = fogguard_domain::evaluate(&request, &policy.config);
        let at = datetime!(2026-03-04 05:06:07 UTC);
        build_receipt(decision, &policy, at, at)
    }

    #[test]
    fn receipt_carries_decision_and_policy() {
        let receipt = denied_receipt();
        assert_eq!(receipt.schema, SCHEMA_DECISION_V1);
        assert_eq!(receipt.tool.name, "fogguard");
        assert_eq!(receipt.verdict, Verdict::Deny);
        assert!(!receipt.allow);
        assert_eq!(
            receipt.failed_predicates,
            vec!["within_limits.children", "ttl_positive"]
        );
        assert_eq!(receipt.findings.len(), 2);
        assert_eq!(receipt.data.profile.as_deref(), Some("default"));
    }

    #[test]
    fn serialized_receipt_uses_snake_case_and_rfc3339() {
        let bytes = serialize_receipt(&denied_receipt()).expect("serialize");
        let v: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(v["verdict"], "deny");
        assert_eq!(v["started_at"], "2026-03-04T05:06:07Z");
        assert_eq!(v["failed_predicates"][1], "ttl_positive");
        assert_eq!(v["data"]["predicates_evaluated"], 9);
    }

    #[test]
    fn renderable_keeps_finding_order() {
        let r = to_renderable(&denied_receipt());
        assert_eq!(r.verdict, RenderableVerdict::Deny);
        let preds: Vec<&str> = r.findings.iter().map(|f| f.predicate.as_str()).collect();
        assert_eq!(preds, vec!["within_limits.children", "ttl_positive"]);
    }
}

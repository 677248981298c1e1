use crate::model::Request;
use crate::policy::PolicyConfig;
use crate::predicates::PREDICATES;
use crate::report::Decision;

/// Evaluate every predicate and collect every failure.
///
/// Never short-circuits, so `failed_predicates` is complete. Default posture is deny:
/// `allow` is true only if nothing failed.
pub fn evaluate(req: &Request, cfg: &PolicyConfig) -> Decision {
    let mut failed_predicates = Vec::new();
    let mut findings = Vec::new();

    for predicate in PREDICATES.iter() {
        if !(predicate.holds)(req, cfg) {
            failed_predicates.push(predicate.id);
            findings.push((predicate.finding)(req, cfg));
        }
    }

    Decision {
        allow: failed_predicates.is_empty(),
        failed_predicates,
        findings,
        predicates_evaluated: PREDICATES.len() as u32,
    }
}

/// Short-circuit variant for callers that only need the allow bit.
///
/// Always agrees with `evaluate(req, cfg).allow`.
pub fn is_allowed(req: &Request, cfg: &PolicyConfig) -> bool {
    PREDICATES.iter().all(|p| (p.holds)(req, cfg))
}

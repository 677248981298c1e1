use std::collections::BTreeSet;

/// Inclusive upper bounds applied by the `within_limits.*` predicates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Limits {
    pub max_ttl: i64,
    pub max_children: i64,
    pub max_concurrency: i64,
    pub max_rate_per_minute: f64,
}

/// Immutable policy snapshot consumed by every predicate.
///
/// Never edited while an evaluation may be reading it. Reconfiguration goes
/// through [`PolicyStore::replace`](crate::snapshot::PolicyStore::replace).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolicyConfig {
    pub wholesome_intents: BTreeSet<String>,
    pub safe_domains: BTreeSet<String>,
    pub limits: Limits,
    /// Enables the encoded-payload detector. Off by default.
    pub enforce_encoded_payload: bool,
}

impl PolicyConfig {
    pub fn intent_allowed(&self, intent: &str) -> bool {
        self.wholesome_intents.contains(intent)
    }

    pub fn domain_allowed(&self, domain: &str) -> bool {
        self.safe_domains.contains(domain)
    }
}

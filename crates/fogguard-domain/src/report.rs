use fogguard_types::{Finding, Verdict};

/// Result of one evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    /// True only when every predicate held.
    pub allow: bool,
    /// Predicate IDs that evaluated false, in evaluation order.
    pub failed_predicates: Vec<&'static str>,
    /// One finding per failed predicate, same order as `failed_predicates`.
    pub findings: Vec<Finding>,
    pub predicates_evaluated: u32,
}

impl Decision {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_allow(self.allow)
    }

    pub fn failed(&self, predicate_id: &str) -> bool {
        self.failed_predicates.contains(&predicate_id)
    }
}

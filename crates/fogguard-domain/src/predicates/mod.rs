//! The fixed, ordered set of admission predicates.
//!
//! Each predicate is a pair of pure functions over `(Request, PolicyConfig)`:
//! `holds` answers the question, `finding` explains a failure. Nothing here
//! reads the clock, the environment, or any global state.

use crate::model::Request;
use crate::policy::PolicyConfig;
use fogguard_types::Finding;

mod allowlist;
mod encoded_payload;
mod limits;
mod pause;
mod ttl;
mod utils;


/// A named predicate.
pub struct Predicate {
    pub id: &'static str,
    pub holds: fn(&Request, &PolicyConfig) -> bool,
    pub finding: fn(&Request, &PolicyConfig) -> Finding,
}

/// All predicates, in evaluation order.
pub static PREDICATES: [Predicate; 9] = [
    pause::PAUSE_BEFORE_PROPAGATE,
    allowlist::INTENT_ALLOWED,
    allowlist::DOMAIN_ALLOWED,
    limits::TTL_WITHIN_LIMIT,
    limits::CHILDREN_WITHIN_LIMIT,
    limits::CONCURRENCY_WITHIN_LIMIT,
    limits::RATE_WITHIN_LIMIT,
    ttl::TTL_POSITIVE,
    encoded_payload::NOT_ENCODED_PAYLOAD,
];

pub fn find(id: &str) -> Option<&'static Predicate> {
    PREDICATES.iter().find(|p| p.id == id)
}

/// `withinLimits`: the conjunction of the four limit predicates.
pub fn within_limits(req: &Request, cfg: &PolicyConfig) -> bool {
    limits::ttl_within(req, cfg)
        && limits::children_within(req, cfg)
        && limits::concurrency_within(req, cfg)
        && limits::rate_within(req, cfg)
}

pub use allowlist::{domain_allowed, intent_allowed};
pub use encoded_payload::not_encoded_payload;
pub use pause::paused;
pub use ttl::ttl_positive;

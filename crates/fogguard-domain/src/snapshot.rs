//! Hot-swappable policy holder.
//!
//! Readers take an `Arc` snapshot and evaluate against it for the whole call;
//! writers swap in a complete new config. A reader can observe the old or the
//! new policy, never a mix of the two.

use crate::engine::evaluate;
use crate::model::Request;
use crate::policy::PolicyConfig;
use crate::report::Decision;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug)]
pub struct PolicyStore {
    current: RwLock<Arc<PolicyConfig>>,
}

impl PolicyStore {
    pub fn new(cfg: PolicyConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(cfg)),
        }
    }

    /// The policy in force right now.
    pub fn snapshot(&self) -> Arc<PolicyConfig> {
        // The lock only guards a pointer swap, so a poisoned lock still holds a whole config.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Atomically install `next`, returning the policy it replaced.
    pub fn replace(&self, next: PolicyConfig) -> Arc<PolicyConfig> {
        let next = Arc::new(next);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }

    /// Evaluate against a single consistent snapshot.
    pub fn evaluate(&self, req: &Request) -> Decision {
        let cfg = self.snapshot();
        evaluate(req, &cfg)
    }
}

//! Pure admission evaluation (no IO).
//!
//! Input: a validated [`Request`](model::Request) and an immutable
//! [`PolicyConfig`](policy::PolicyConfig).
//! Output: a [`Decision`](report::Decision) with the allow bit, the ordered list of failed
//! predicates, and one finding per failure.

#![forbid(unsafe_code)]

pub mod input;
pub mod model;
pub mod payload;
pub mod policy;
pub mod predicates;
pub mod report;
pub mod snapshot;

mod engine;
mod fingerprint;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::{evaluate, is_allowed};
pub use input::InputError;
pub use model::Request;
pub use policy::{Limits, PolicyConfig};
pub use report::Decision;
pub use snapshot::PolicyStore;

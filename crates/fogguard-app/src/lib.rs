//! Use case orchestration for fogguard.
//!
//! This crate provides the application layer: use cases that coordinate the settings, domain,
//! and render layers. It is intentionally thin and delegates heavy lifting to those layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod explain;
mod render;
mod report;

pub use check::{
    CheckError, CheckInput, CheckOutput, EXIT_ERROR, PolicySource, run_check, verdict_exit_code,
};
pub use explain::{
    ExplainOutput, PredicateExplanation, PredicateSlot, WorkedRequest, format_explanation,
    format_not_found, run_explain,
};
pub use render::{OutputFormat, render_receipt};
pub use report::{build_receipt, serialize_receipt, to_renderable};

//! Rendering utilities for decision output (plain text, Markdown, YAML).

#![forbid(unsafe_code)]

mod markdown;
mod model;
mod text;
mod yaml;

pub use markdown::render_markdown;
pub use model::{RenderableData, RenderableFinding, RenderableReport, RenderableVerdict};
pub use text::render_text;
pub use yaml::render_yaml;

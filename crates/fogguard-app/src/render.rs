//! Render use cases: turn a receipt into the requested output format.

use anyhow::Context;
use fogguard_types::DecisionReceipt;

use crate::report::{serialize_receipt, to_renderable};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
    Markdown,
}

/// Render a receipt. `explain` only affects the text format; the others always carry
/// every finding.
pub fn render_receipt(
    receipt: &DecisionReceipt,
    format: OutputFormat,
    explain: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(fogguard_render::render_text(&to_renderable(receipt), explain)),
        OutputFormat::Markdown => Ok(fogguard_render::render_markdown(&to_renderable(receipt))),
        OutputFormat::Json => {
            let bytes = serialize_receipt(receipt)?;
            let mut text = String::from_utf8(bytes).context("receipt json is utf-8")?;
            text.push('\n');
            Ok(text)
        }
        OutputFormat::Yaml => {
            fogguard_render::render_yaml(receipt).context("serialize receipt as yaml")
        }
    }
}

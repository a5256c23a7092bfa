//! Plain-text projection of the block model.
//!
//! Serialization only. This is what the prose-quality scoring collaborators
//! consume: visible text with paragraph boundaries, no styling.

use vellum_model::{Block, Inline};

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};

/// Format implementation for plain text output
#[derive(Default)]
pub struct TextFormat;

impl Format for TextFormat {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Plain text projection"
    }

    fn file_extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, blocks: &[Block]) -> Result<SerializedDocument, FormatError> {
        Ok(SerializedDocument::Text(render_text(blocks)))
    }
}

/// Render blocks as plain text, one blank line between block-level units.
pub fn render_text(blocks: &[Block]) -> String {
    let mut out = String::new();

    for block in blocks {
        let chunk = match block {
            Block::Paragraph(paragraph) => paragraph.text(),
            Block::ListItem(item) => inline_text(&item.runs),
            Block::TableRow(row) => row
                .cells
                .iter()
                .map(|cell| {
                    cell.iter()
                        .map(|p| p.text())
                        .collect::<Vec<_>>()
                        .join("\n")
                })
                .collect::<Vec<_>>()
                .join(" | "),
            Block::Image(_) | Block::PageBreak => String::new(),
            Block::Callout(callout) => callout_text(callout),
        };

        let trimmed = chunk.trim();
        if !trimmed.is_empty() {
            out.push_str(trimmed);
            out.push_str("\n\n");
        }
    }

    out.trim_end().to_string()
}

fn inline_text(runs: &[Inline]) -> String {
    let mut out = String::new();
    for inline in runs {
        match inline {
            Inline::Run(run) => out.push_str(&run.text),
            Inline::LineBreak => out.push('\n'),
        }
    }
    out
}

fn callout_text(callout: &vellum_model::CalloutBlock) -> String {
    use vellum_model::CalloutBlock;
    match callout {
        CalloutBlock::Spacing(spacing) => match &spacing.message {
            Some(message) => format!("{}\n{message}", spacing.label),
            None => spacing.label.clone(),
        },
        CalloutBlock::DualCoding(dual) => {
            let mut lines = vec![dual.title.clone()];
            for field in [&dual.reason, &dual.context, &dual.action]
                .into_iter()
                .flatten()
            {
                lines.push(field.clone());
            }
            lines.join("\n")
        }
        CalloutBlock::Screenplay(screenplay) => inline_text(&screenplay.runs),
    }
}

//! HTML format implementation
//!
//! This module implements both directions of the editor surface: parsing an
//! HTML tree (contentEditable output or importer output, they share one
//! grammar) into the block model, and serializing the block model back into
//! a standalone HTML document.
//!
//! # Library Choice
//!
//! We use the `html5ever` + `rcdom` ecosystem for HTML parsing and
//! serialization:
//! - `html5ever`: Browser-grade HTML5 parser from the Servo project
//! - `markup5ever_rcdom`: Reference-counted DOM tree implementation
//!
//! Documents arriving here come out of a real browser editing surface, so
//! a spec-compliant parser that shrugs off malformed markup is mandatory;
//! regex- or substring-level HTML handling is not an option.
//!
//! # Element Mapping Table
//!
//! | HTML                           | Block                                   |
//! |--------------------------------|-----------------------------------------|
//! | `h1`–`h6`                      | Paragraph with heading level             |
//! | `p`, `div`, `section`, …       | Paragraph (style via class table)        |
//! | `p.doc-title` / `.doc-subtitle`| Paragraph with native Title/Subtitle     |
//! | `blockquote[.class]`           | Paragraph styled Quote/Block Quote/…     |
//! | `ul`/`ol` + `li`               | ListItem with literal marker run         |
//! | `table`                        | One pipe-joined paragraph per row        |
//! | `div.column-container`         | TableRow (true grid, borderless)         |
//! | `img`                          | Image (resolved bytes + dimensions)      |
//! | `div.page-break`               | PageBreak                                |
//! | `div.spacing-indicator`        | Callout::Spacing                         |
//! | `div.dual-coding-callout`      | Callout::DualCoding                      |
//! | `div.screenplay-block`         | Callout::Screenplay                      |
//! | inline tags + restricted CSS   | StyleFlags on the enclosing runs         |

pub mod convert;
pub mod image;
pub mod inline;
pub mod serializer;

use std::collections::HashMap;

use vellum_model::Block;

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};

/// Format implementation for HTML
#[derive(Default)]
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "Editor HTML with embedded CSS on export"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &[u8]) -> Result<Vec<Block>, FormatError> {
        let html = String::from_utf8_lossy(source);
        Ok(convert::convert_html(&html))
    }

    fn serialize(&self, blocks: &[Block]) -> Result<SerializedDocument, FormatError> {
        let options = serializer::HtmlOptions::default();
        serializer::serialize_to_html(blocks, &options).map(SerializedDocument::Text)
    }

    fn serialize_with_options(
        &self,
        blocks: &[Block],
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let mut html_options = serializer::HtmlOptions::default();
        if let Some(title) = options.get("title") {
            html_options.title = title.clone();
        }
        if let Some(css) = options.get("custom-css") {
            html_options.custom_css = Some(css.clone());
        }
        serializer::serialize_to_html(blocks, &html_options).map(SerializedDocument::Text)
    }
}

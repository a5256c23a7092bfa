//! DOCX format implementation
//!
//! Both halves of the word-processor surface:
//! - parse: unpack the container, map styles through the style map into
//!   editor HTML, then run the HTML converter to reach the block model
//!   (`reader`).
//! - serialize: assemble the block model into a .docx with real style
//!   definitions, page furniture and an estimated table of contents
//!   (`writer` + `assembler`).
//!
//! # Library Choice
//!
//! Reading uses `zip` + `roxmltree`: the import mapping is a thin,
//! style-map-driven projection and namespace-aware XML walking is all it
//! needs. Writing uses `docx-rs`, which owns the OOXML packaging details
//! (content types, relationships, numbering, media parts) that are easy to
//! get subtly wrong by hand.

pub mod assembler;
pub mod reader;
pub mod styles;
pub mod writer;

use std::collections::HashMap;

use vellum_model::{Block, DocumentStore};

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::formats::html::convert;

pub use assembler::AssembleOptions;
pub use reader::{import_docx, ImportOptions, ImportedDocument};

/// Format implementation for .docx
#[derive(Default)]
pub struct DocxFormat;

impl Format for DocxFormat {
    fn name(&self) -> &str {
        "docx"
    }

    fn description(&self) -> &str {
        "Word-processor documents (OOXML)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &[u8]) -> Result<Vec<Block>, FormatError> {
        // A throwaway store: registry-level parsing has no caller to hand
        // the original to.
        let mut store = DocumentStore::new();
        let imported = reader::import_docx(source, &ImportOptions::default(), &mut store)?;
        Ok(convert::convert_html(&imported.html))
    }

    fn serialize(&self, blocks: &[Block]) -> Result<SerializedDocument, FormatError> {
        assembler::assemble(blocks, &AssembleOptions::default()).map(SerializedDocument::Binary)
    }

    fn serialize_with_options(
        &self,
        blocks: &[Block],
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let assemble_options = assemble_options_from(options)?;
        assembler::assemble(blocks, &assemble_options).map(SerializedDocument::Binary)
    }
}

/// Translate `--extra-*` style string options into assembler options.
fn assemble_options_from(
    options: &HashMap<String, String>,
) -> Result<AssembleOptions, FormatError> {
    let mut assemble = AssembleOptions::default();

    if let Some(text) = options.get("header") {
        assemble.header_text = Some(text.clone());
    }
    if let Some(text) = options.get("footer") {
        assemble.footer_text = Some(text.clone());
    }
    if let Some(value) = options.get("facing-pages") {
        assemble.facing_pages = parse_bool(value, "facing-pages")?;
    }
    if let Some(value) = options.get("page-numbers") {
        assemble.page_numbers = parse_bool(value, "page-numbers")?;
    }
    if let Some(value) = options.get("toc") {
        assemble.include_toc = parse_bool(value, "toc")?;
    }
    if let Some(value) = options.get("chars-per-page") {
        assemble.chars_per_page = value.parse().map_err(|_| {
            FormatError::SerializationError(format!(
                "Invalid numeric value '{value}' for --extra-chars-per-page"
            ))
        })?;
    }

    Ok(assemble)
}

fn parse_bool(value: &str, key: &str) -> Result<bool, FormatError> {
    if value.is_empty() {
        return Ok(true);
    }
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(FormatError::SerializationError(format!(
            "Invalid boolean value '{other}' for --extra-{key}"
        ))),
    }
}

//! High-level import/export entry points.
//!
//! These are the calls an application embeds: import a .docx into editor
//! HTML, and export edited HTML back to .docx or standalone HTML. The
//! registry underneath stays format-agnostic; this module adds the
//! pipeline-specific policy — analysis appendices, file-name hygiene, the
//! plain-text fallback when the HTML surface yields nothing.

use vellum_model::Block;

use crate::analysis::{report_blocks, AnalysisReport};
use crate::error::FormatError;
use crate::formats::docx::assembler::{assemble, AssembleOptions};
use crate::formats::html::convert;
use crate::formats::html::serializer::{serialize_to_html, HtmlOptions};

/// MIME type of the word-processor export.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// MIME type of the HTML export.
pub const HTML_MIME: &str = "text/html";

/// What the export should contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportMode {
    /// The manuscript itself.
    #[default]
    Writer,
    /// The analysis report, standalone.
    Analysis,
}

/// One export request, either target format.
#[derive(Debug, Clone, Default)]
pub struct ExportRequest {
    /// Editor HTML. Preferred content source.
    pub html: Option<String>,
    /// Plain-text fallback when no HTML is available.
    pub text: Option<String>,
    pub file_name: Option<String>,
    pub analysis: Option<AnalysisReport>,
    /// Append the analysis appendix to a Writer-mode export.
    pub include_highlights: bool,
    pub mode: ExportMode,
    pub assemble: AssembleOptions,
}

/// A fully materialized export: bytes plus the name/MIME to save them under.
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Export to .docx bytes.
pub fn export_docx(request: &ExportRequest) -> Result<ExportedFile, FormatError> {
    let blocks = content_blocks(request)?;
    let bytes = assemble(&blocks, &request.assemble)?;
    Ok(ExportedFile {
        file_name: sanitize_file_name(request.file_name.as_deref().unwrap_or("document"), "docx"),
        mime: DOCX_MIME,
        bytes,
    })
}

/// Export to a standalone HTML document.
pub fn export_html(request: &ExportRequest) -> Result<ExportedFile, FormatError> {
    let blocks = content_blocks(request)?;
    let title = request
        .file_name
        .as_deref()
        .map(|name| name.trim_end_matches(".html").trim_end_matches(".docx"))
        .unwrap_or("")
        .to_string();
    let html = serialize_to_html(&blocks, &HtmlOptions { title, custom_css: None })?;
    Ok(ExportedFile {
        file_name: sanitize_file_name(request.file_name.as_deref().unwrap_or("document"), "html"),
        mime: HTML_MIME,
        bytes: html.into_bytes(),
    })
}

/// Resolve the request into the block sequence to serialize.
fn content_blocks(request: &ExportRequest) -> Result<Vec<Block>, FormatError> {
    if request.mode == ExportMode::Analysis {
        let report = request.analysis.as_ref().ok_or_else(|| {
            FormatError::SerializationError(
                "Analysis export requested without analysis results".to_string(),
            )
        })?;
        return Ok(report_blocks(report));
    }

    let mut blocks = match &request.html {
        Some(html) => convert::convert_html(html),
        None => Vec::new(),
    };
    if blocks.is_empty() {
        if let Some(text) = &request.text {
            blocks = convert::plain_text_blocks(text);
        }
    }
    if blocks.is_empty() {
        return Err(FormatError::SerializationError(
            "Nothing to export: both html and text are empty".to_string(),
        ));
    }

    if request.include_highlights {
        if let Some(report) = &request.analysis {
            blocks.push(Block::PageBreak);
            blocks.extend(report_blocks(report));
        }
    }

    Ok(blocks)
}

/// Replace characters that are illegal in common filesystems with `-` and
/// force the expected extension.
pub fn sanitize_file_name(name: &str, extension: &str) -> String {
    let stem = name
        .trim()
        .trim_end_matches(&format!(".{extension}"))
        .to_string();

    let mut cleaned: String = stem
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();

    let trimmed = cleaned.trim().trim_matches('.');
    cleaned = if trimmed.is_empty() {
        "document".to_string()
    } else {
        trimmed.to_string()
    };

    format!("{cleaned}.{extension}")
}

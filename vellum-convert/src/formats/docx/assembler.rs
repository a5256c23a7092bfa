//! Final document assembly: page geometry, headers/footers, table of
//! contents, then serialization to .docx bytes.

use std::io::Cursor;

use docx_rs::*;
use vellum_model::{Block, TocEntry};

use crate::error::FormatError;
use crate::formats::docx::styles::DocxStyles;
use crate::formats::docx::writer;

/// Page and furniture options for an export.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Page size in twentieths of a point. Defaults to US Letter.
    pub page_width: u32,
    pub page_height: u32,
    /// Uniform page margin in twentieths of a point.
    pub margin: u32,
    /// Mirrored layout: distinct even/odd headers with the page number on
    /// the outside edge.
    pub facing_pages: bool,
    pub header_text: Option<String>,
    pub footer_text: Option<String>,
    pub page_numbers: bool,
    pub include_toc: bool,
    /// Divisor for the TOC page estimate.
    pub chars_per_page: usize,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            page_width: 12240,
            page_height: 15840,
            margin: 1440,
            facing_pages: false,
            header_text: None,
            footer_text: None,
            page_numbers: true,
            include_toc: false,
            chars_per_page: 3000,
        }
    }
}

/// Assemble a block sequence into .docx bytes.
///
/// Fails atomically: either the full byte vector is returned or a
/// [`FormatError::SerializationError`] — callers never see a partial file.
pub fn assemble(blocks: &[Block], options: &AssembleOptions) -> Result<Vec<u8>, FormatError> {
    let mut docx = Docx::new()
        .page_size(options.page_width, options.page_height)
        .page_margin(
            PageMargin::new()
                .top(options.margin as i32)
                .bottom(options.margin as i32)
                .left(options.margin as i32)
                .right(options.margin as i32),
        );

    docx = DocxStyles::new().initialize_styles(docx);
    docx = add_furniture(docx, options);

    if options.include_toc {
        docx = add_toc(docx, blocks, options);
    }

    for block in blocks {
        docx = writer::append_block(docx, block);
    }

    let built = docx.build();
    let mut buffer = Vec::new();
    built
        .pack(&mut Cursor::new(&mut buffer))
        .map_err(|e| FormatError::SerializationError(format!("Failed to pack DOCX: {e}")))?;
    Ok(buffer)
}

/// Scan the block sequence for headings and estimate their page numbers from
/// accumulated character counts.
///
/// The estimate cannot match the consuming word processor's real pagination —
/// fonts, margins and widow control all move the real numbers. Callers must
/// treat these as best-effort, nothing more.
pub fn compute_toc(blocks: &[Block], chars_per_page: usize) -> Vec<TocEntry> {
    let chars_per_page = chars_per_page.max(1);
    let mut entries = Vec::new();
    let mut chars_so_far = 0usize;

    for block in blocks {
        if let Block::Paragraph(paragraph) = block {
            if let Some(level) = paragraph.heading.filter(|l| *l <= 3) {
                let text = paragraph.text();
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    entries.push(TocEntry {
                        text: trimmed.to_string(),
                        level,
                        page_number: (chars_so_far / chars_per_page) as u32 + 1,
                    });
                }
            }
        }
        chars_so_far += block_char_count(block);
    }

    entries
}

fn block_char_count(block: &Block) -> usize {
    match block {
        Block::Paragraph(p) => p.text().chars().count() + 1,
        Block::ListItem(item) => {
            item.runs
                .iter()
                .map(|inline| match inline {
                    vellum_model::Inline::Run(run) => run.text.chars().count(),
                    vellum_model::Inline::LineBreak => 1,
                })
                .sum::<usize>()
                + 1
        }
        Block::TableRow(row) => row
            .cells
            .iter()
            .flatten()
            .map(|p| p.text().chars().count())
            .sum(),
        // Images occupy roughly a third of a page in the estimate.
        Block::Image(_) => 1000,
        Block::PageBreak => 3000,
        Block::Callout(_) => 120,
    }
}

fn add_toc(mut docx: Docx, blocks: &[Block], options: &AssembleOptions) -> Docx {
    let entries = compute_toc(blocks, options.chars_per_page);
    if entries.is_empty() {
        return docx;
    }

    docx = docx.add_paragraph(
        Paragraph::new()
            .style("Heading1")
            .add_run(Run::new().add_text("Contents")),
    );

    for entry in &entries {
        let indent = (entry.level as i32 - 1) * 360;
        let mut para = Paragraph::new().add_run(
            Run::new().add_text(format!("{}  {}", entry.text, entry.page_number)),
        );
        if indent > 0 {
            para = para.indent(Some(indent), None, None, None);
        }
        docx = docx.add_paragraph(para);
    }

    docx.add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)))
}

fn add_furniture(mut docx: Docx, options: &AssembleOptions) -> Docx {
    if let Some(text) = &options.header_text {
        let header = Header::new().add_paragraph(
            Paragraph::new()
                .align(AlignmentType::Center)
                .add_run(Run::new().add_text(text.as_str())),
        );
        docx = docx.header(header);
    }

    if options.page_numbers || options.footer_text.is_some() {
        if options.facing_pages {
            docx = docx
                .footer(footer_paragraph(options, AlignmentType::Right))
                .even_footer(footer_paragraph(options, AlignmentType::Left))
                .even_and_odd_headers();
        } else {
            docx = docx.footer(footer_paragraph(options, AlignmentType::Center));
        }
    }

    docx
}

/// Footer line: optional literal text plus a PAGE field the consumer fills
/// in at render time.
fn footer_paragraph(options: &AssembleOptions, align: AlignmentType) -> Footer {
    let mut para = Paragraph::new().align(align);

    if let Some(text) = &options.footer_text {
        para = para.add_run(Run::new().add_text(format!("{text}  ")));
    }
    if options.page_numbers {
        para = para
            .add_run(Run::new().add_field_char(FieldCharType::Begin, false))
            .add_run(Run::new().add_instr_text(InstrText::Unsupported("PAGE".to_string())))
            .add_run(Run::new().add_field_char(FieldCharType::End, false));
    }

    Footer::new().add_paragraph(para)
}

//! Block sequence → WordprocessingML body content.
//!
//! Each block maps onto the docx-rs builder API. Paragraph-shaped blocks are
//! straightforward; callouts render as single-cell shaded tables (the
//! container's shading primitive), and the column layout renders as the one
//! true borderless grid the pipeline produces.

use docx_rs::*;
use vellum_model::{
    Alignment, Block, CalloutBlock, DualCodingCallout, ImageBlock, Inline, ListItemBlock,
    ParagraphBlock, ScreenplayCallout, ScreenplayKind, SpacingCallout, StyleFlags, TableRowBlock,
    TextRun,
};

/// Pixels → EMU.
const EMU_PER_PIXEL: u32 = 9525;

/// Append one block to the document under construction.
pub fn append_block(docx: Docx, block: &Block) -> Docx {
    match block {
        Block::Paragraph(paragraph) => docx.add_paragraph(build_paragraph(paragraph)),
        Block::ListItem(item) => docx.add_paragraph(build_list_item(item)),
        Block::TableRow(row) => docx.add_table(build_grid_row(row)),
        Block::Image(image) => docx.add_paragraph(build_image_paragraph(image)),
        Block::PageBreak => {
            docx.add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)))
        }
        Block::Callout(callout) => append_callout(docx, callout),
    }
}

/// Build a docx paragraph from a paragraph block.
pub fn build_paragraph(paragraph: &ParagraphBlock) -> Paragraph {
    let mut para = Paragraph::new();

    if let Some(style) = effective_style(paragraph) {
        para = para.style(&style);
    }
    if let Some(alignment) = paragraph.alignment {
        para = para.align(alignment_type(alignment));
    }
    if paragraph.spacing.before.is_some() || paragraph.spacing.after.is_some() {
        let mut spacing = LineSpacing::new();
        if let Some(before) = paragraph.spacing.before {
            spacing = spacing.before(before);
        }
        if let Some(after) = paragraph.spacing.after {
            spacing = spacing.after(after);
        }
        para = para.line_spacing(spacing);
    }
    if let Some(indent) = paragraph.indent {
        let special = indent.first_line.map(SpecialIndentType::FirstLine);
        para = para.indent(indent.left, special, indent.right, None);
    }

    append_inlines(para, &paragraph.runs)
}

fn effective_style(paragraph: &ParagraphBlock) -> Option<String> {
    if let Some(style) = &paragraph.style {
        return Some(style.clone());
    }
    paragraph.heading.map(|level| format!("Heading{level}"))
}

fn append_inlines(mut para: Paragraph, inlines: &[Inline]) -> Paragraph {
    for inline in inlines {
        match inline {
            Inline::Run(run) => {
                para = para.add_run(build_run(run));
            }
            Inline::LineBreak => {
                para = para.add_run(Run::new().add_break(BreakType::TextWrapping));
            }
        }
    }
    para
}

/// Build a docx run from a text run's resolved style flags.
pub fn build_run(text_run: &TextRun) -> Run {
    let mut run = Run::new().add_text(text_run.text.as_str());
    run = apply_flags(run, &text_run.flags);
    run
}

fn apply_flags(mut run: Run, flags: &StyleFlags) -> Run {
    if flags.bold {
        run = run.bold();
    }
    if flags.italics {
        run = run.italic();
    }
    if flags.underline {
        run = run.underline("single");
    }
    if flags.strike {
        run = run.strike();
    }
    if let Some(color) = &flags.color {
        run = run.color(color.as_str());
    }
    if let Some(font) = &flags.font {
        run = run.fonts(
            RunFonts::new()
                .ascii(font.as_str())
                .hi_ansi(font.as_str())
                .cs(font.as_str()),
        );
    }
    if flags.super_script() {
        run = run.vert_align(VertAlignType::SuperScript);
    }
    if flags.sub_script() {
        run = run.vert_align(VertAlignType::SubScript);
    }
    run
}

fn alignment_type(alignment: Alignment) -> AlignmentType {
    match alignment {
        Alignment::Left => AlignmentType::Left,
        Alignment::Center => AlignmentType::Center,
        Alignment::Right => AlignmentType::Right,
        Alignment::Justify => AlignmentType::Both,
    }
}

fn build_list_item(item: &ListItemBlock) -> Paragraph {
    // The literal marker already leads the runs; the style supplies indent.
    let para = Paragraph::new().style("ListParagraph");
    append_inlines(para, &item.runs)
}

fn build_image_paragraph(image: &ImageBlock) -> Paragraph {
    let pic = Pic::new(&image.bytes).size(
        image.width * EMU_PER_PIXEL,
        image.height * EMU_PER_PIXEL,
    );
    let mut para = Paragraph::new().add_run(Run::new().add_image(pic));
    para = para.align(alignment_type(image.alignment));
    para
}

/// The one legitimate true grid: side-by-side column content, borderless.
fn build_grid_row(row: &TableRowBlock) -> Table {
    let cells: Vec<TableCell> = row
        .cells
        .iter()
        .map(|paragraphs| {
            let mut cell = TableCell::new();
            if paragraphs.is_empty() {
                cell = cell.add_paragraph(Paragraph::new());
            }
            for paragraph in paragraphs {
                cell = cell.add_paragraph(build_paragraph(paragraph));
            }
            cell
        })
        .collect();

    Table::new(vec![TableRow::new(cells)]).set_borders(TableBorders::new().clear_all())
}

fn append_callout(docx: Docx, callout: &CalloutBlock) -> Docx {
    match callout {
        CalloutBlock::Spacing(spacing) => docx.add_table(build_spacing_callout(spacing)),
        CalloutBlock::DualCoding(dual) => docx.add_table(build_dual_coding_callout(dual)),
        CalloutBlock::Screenplay(screenplay) => {
            docx.add_paragraph(build_screenplay_paragraph(screenplay))
        }
    }
}

/// One shaded cell holding the label line and the optional message line.
fn build_spacing_callout(callout: &SpacingCallout) -> Table {
    let mut cell = TableCell::new().shading(
        Shading::new()
            .shd_type(ShdType::Clear)
            .fill(callout.palette.fill.as_str()),
    );

    if !callout.label.is_empty() {
        cell = cell.add_paragraph(
            Paragraph::new().add_run(
                Run::new()
                    .add_text(callout.label.as_str())
                    .bold()
                    .color(callout.palette.accent.as_str()),
            ),
        );
    }
    if let Some(message) = &callout.message {
        cell = cell.add_paragraph(
            Paragraph::new().add_run(
                Run::new()
                    .add_text(message.as_str())
                    .color(callout.palette.text.as_str()),
            ),
        );
    }
    if callout.label.is_empty() && callout.message.is_none() {
        cell = cell.add_paragraph(Paragraph::new());
    }

    Table::new(vec![TableRow::new(vec![cell])]).set_borders(TableBorders::new().clear_all())
}

fn build_dual_coding_callout(callout: &DualCodingCallout) -> Table {
    let mut cell = TableCell::new().shading(
        Shading::new().shd_type(ShdType::Clear).fill("F9FAFB"),
    );

    let title = match &callout.icon {
        Some(icon) => format!("{icon} {}", callout.title),
        None => callout.title.clone(),
    };
    cell = cell.add_paragraph(
        Paragraph::new().add_run(
            Run::new()
                .add_text(title)
                .bold()
                .color(callout.priority.accent()),
        ),
    );

    for field in [&callout.reason, &callout.context, &callout.action]
        .into_iter()
        .flatten()
    {
        cell = cell
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text(field.as_str())));
    }

    Table::new(vec![TableRow::new(vec![cell])]).set_borders(TableBorders::new().clear_all())
}

fn build_screenplay_paragraph(screenplay: &ScreenplayCallout) -> Paragraph {
    let mut para = Paragraph::new().align(alignment_type(screenplay.kind.alignment()));

    let indent = screenplay.kind.left_indent();
    if indent > 0 {
        para = para.indent(Some(indent), None, None, None);
    }
    if screenplay.kind == ScreenplayKind::Spacer {
        return para;
    }
    append_inlines(para, &screenplay.runs)
}

//! Export tests: assemble block sequences, unpack the resulting container,
//! and assert on the WordprocessingML inside.

use std::collections::HashMap;
use std::io::Read;

use vellum_convert::formats::docx::assembler::{assemble, compute_toc, AssembleOptions};
use vellum_convert::{to_blocks, FormatRegistry};
use vellum_model::{Block, Inline, ParagraphBlock, Spacing, StyleFlags, TextRun};

fn paragraph(text: &str) -> Block {
    let run = TextRun::sanitized(text, StyleFlags::default()).unwrap();
    Block::Paragraph(ParagraphBlock {
        runs: vec![Inline::Run(run)],
        spacing: Spacing::new(None, Some(200)),
        ..ParagraphBlock::default()
    })
}

fn heading(level: u8, text: &str) -> Block {
    let run = TextRun::sanitized(text, StyleFlags::default()).unwrap();
    Block::Paragraph(ParagraphBlock::heading(level, vec![Inline::Run(run)]))
}

/// Unzip and return the named entry as text.
fn zip_entry(bytes: &[u8], name: &str) -> Option<String> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).ok()?;
    let mut entry = archive.by_name(name).ok()?;
    let mut content = String::new();
    entry.read_to_string(&mut content).ok()?;
    Some(content)
}

/// Concatenated text of every XML entry, for whole-container assertions.
fn all_xml(bytes: &[u8]) -> String {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    let mut out = String::new();
    for name in names {
        if !name.ends_with(".xml") {
            continue;
        }
        let mut entry = archive.by_name(&name).unwrap();
        let mut content = String::new();
        if entry.read_to_string(&mut content).is_ok() {
            out.push_str(&content);
        }
    }
    out
}

#[test]
fn produces_a_zip_container_with_document_part() {
    let bytes = assemble(&[paragraph("Hello")], &AssembleOptions::default()).unwrap();
    assert!(bytes.starts_with(b"PK"));

    let document = zip_entry(&bytes, "word/document.xml").expect("document part");
    assert!(document.contains("Hello"));
}

#[test]
fn heading_paragraphs_reference_heading_styles() {
    let blocks = vec![heading(1, "Chapter"), paragraph("Body")];
    let bytes = assemble(&blocks, &AssembleOptions::default()).unwrap();

    let document = zip_entry(&bytes, "word/document.xml").unwrap();
    assert!(document.contains("Heading1"));
    assert!(document.contains("Chapter"));
}

#[test]
fn styles_part_defines_the_mapped_styles() {
    let bytes = assemble(&[paragraph("x")], &AssembleOptions::default()).unwrap();
    let styles = zip_entry(&bytes, "word/styles.xml").unwrap();

    for style in ["Title", "Subtitle", "Epigraph", "BodyTextFirstIndent"] {
        assert!(styles.contains(style), "missing style {style}");
    }
}

#[test]
fn inline_flags_serialize_to_run_properties() {
    let mut bold = StyleFlags::default();
    bold.bold = true;
    let mut colored = StyleFlags::default();
    colored.color = Some("FF0000".to_string());

    let blocks = vec![Block::Paragraph(ParagraphBlock::new(vec![
        Inline::Run(TextRun::sanitized("bold", bold).unwrap()),
        Inline::Run(TextRun::sanitized("red", colored).unwrap()),
    ]))];
    let bytes = assemble(&blocks, &AssembleOptions::default()).unwrap();

    let document = zip_entry(&bytes, "word/document.xml").unwrap();
    assert!(document.contains("<w:b"));
    assert!(document.contains("FF0000"));
}

#[test]
fn page_break_block_emits_a_page_break() {
    let blocks = vec![paragraph("a"), Block::PageBreak, paragraph("b")];
    let bytes = assemble(&blocks, &AssembleOptions::default()).unwrap();

    let document = zip_entry(&bytes, "word/document.xml").unwrap();
    assert!(document.contains("w:type=\"page\"") || document.contains("type=\"page\""));
}

#[test]
fn footer_carries_a_page_field_by_default() {
    let bytes = assemble(&[paragraph("x")], &AssembleOptions::default()).unwrap();
    let xml = all_xml(&bytes);
    assert!(xml.contains("PAGE"));
}

#[test]
fn header_text_lands_in_a_header_part() {
    let options = AssembleOptions {
        header_text: Some("My Novel".to_string()),
        ..AssembleOptions::default()
    };
    let bytes = assemble(&[paragraph("x")], &options).unwrap();
    assert!(all_xml(&bytes).contains("My Novel"));
}

#[test]
fn toc_lists_headings_with_estimated_pages() {
    let mut blocks = vec![heading(1, "One")];
    // ~2 pages of filler between the headings at 3000 chars/page.
    for _ in 0..60 {
        blocks.push(paragraph(&"x".repeat(100)));
    }
    blocks.push(heading(1, "Two"));

    let entries = compute_toc(&blocks, 3000);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].text, "One");
    assert_eq!(entries[0].page_number, 1);
    assert_eq!(entries[1].text, "Two");
    assert!(entries[1].page_number >= 3, "got {}", entries[1].page_number);
}

#[test]
fn deep_headings_stay_out_of_the_toc() {
    let blocks = vec![heading(1, "Top"), heading(4, "Too deep")];
    let entries = compute_toc(&blocks, 3000);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].text, "Top");
}

#[test]
fn toc_option_renders_a_contents_section() {
    let blocks = vec![heading(1, "Alpha"), paragraph("body")];
    let options = AssembleOptions {
        include_toc: true,
        ..AssembleOptions::default()
    };
    let bytes = assemble(&blocks, &options).unwrap();

    let document = zip_entry(&bytes, "word/document.xml").unwrap();
    assert!(document.contains("Contents"));
    assert!(document.contains("Alpha"));
}

#[test]
fn registry_serializes_docx_with_extra_options() {
    let registry = FormatRegistry::default();
    let blocks = to_blocks("<h1>Doc</h1><p>Body</p>");

    let mut options = HashMap::new();
    options.insert("toc".to_string(), "true".to_string());
    options.insert("header".to_string(), "Running Head".to_string());

    let out = registry
        .serialize_with_options(&blocks, "docx", &options)
        .unwrap();
    let bytes = out.into_bytes();
    assert!(bytes.starts_with(b"PK"));
    assert!(all_xml(&bytes).contains("Running Head"));
}

#[test]
fn invalid_extra_option_is_a_serialization_error() {
    let registry = FormatRegistry::default();
    let blocks = to_blocks("<p>Body</p>");

    let mut options = HashMap::new();
    options.insert("toc".to_string(), "maybe".to_string());

    assert!(registry
        .serialize_with_options(&blocks, "docx", &options)
        .is_err());
}

#[test]
fn full_pipeline_html_to_docx_and_back() {
    let html = "<h1>Round</h1><p>Trip <strong>bold</strong> text.</p>";
    let blocks = to_blocks(html);
    let bytes = assemble(&blocks, &AssembleOptions::default()).unwrap();

    // Re-import what we just wrote.
    let mut store = vellum_model::DocumentStore::new();
    let imported = vellum_convert::import_docx(
        &bytes,
        &vellum_convert::ImportOptions::default(),
        &mut store,
    )
    .unwrap();

    assert!(imported.html.contains("<h1>Round</h1>"));
    assert!(imported.html.contains("<strong>bold</strong>"));
    assert!(imported.text.contains("Trip bold text."));
}

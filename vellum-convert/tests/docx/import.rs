//! Import tests: minimal .docx containers built in-memory, walked through
//! the importer, assertions on the produced HTML/text/metadata.

use std::io::Write;

use vellum_convert::{import_docx, FormatError, ImportFailure, ImportOptions};
use vellum_model::DocumentStore;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Build a .docx-shaped zip with the given document.xml body content.
fn docx_with_body(body: &str) -> Vec<u8> {
    let document = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"{W_NS}\"><w:body>{body}</w:body></w:document>"
    );
    build_zip(&[("word/document.xml", document.as_bytes())])
}

fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut cursor);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        for (name, content) in entries {
            writer.start_file(name.to_string(), options).unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap();
    }
    cursor.into_inner()
}

fn paragraph(style: Option<&str>, runs: &str) -> String {
    match style {
        Some(style) => format!(
            "<w:p><w:pPr><w:pStyle w:val=\"{style}\"/></w:pPr>{runs}</w:p>"
        ),
        None => format!("<w:p>{runs}</w:p>"),
    }
}

fn run(text: &str) -> String {
    format!("<w:r><w:t>{text}</w:t></w:r>")
}

#[test]
fn heading_style_maps_to_h1() {
    let body = paragraph(Some("Heading1"), &run("Chapter One"));
    let bytes = docx_with_body(&body);

    let mut store = DocumentStore::new();
    let imported = import_docx(&bytes, &ImportOptions::default(), &mut store).unwrap();

    assert!(imported.html.contains("<h1>Chapter One</h1>"));
    assert_eq!(imported.text, "Chapter One");
}

#[test]
fn title_style_maps_to_doc_title_class() {
    let body = paragraph(Some("Title"), &run("My Book"));
    let bytes = docx_with_body(&body);

    let mut store = DocumentStore::new();
    let imported = import_docx(&bytes, &ImportOptions::default(), &mut store).unwrap();

    assert!(imported.html.contains("<h1 class=\"doc-title\">My Book</h1>"));
    assert!(imported
        .metadata
        .detected_styles
        .iter()
        .any(|s| s == "doc-title"));
}

#[test]
fn unknown_style_degrades_to_plain_paragraph() {
    let body = paragraph(Some("FancyCustomStyle"), &run("text"));
    let bytes = docx_with_body(&body);

    let mut store = DocumentStore::new();
    let imported = import_docx(&bytes, &ImportOptions::default(), &mut store).unwrap();

    assert!(imported.html.contains("<p>text</p>"));
}

#[test]
fn bold_italic_runs_become_semantic_markup() {
    let runs = "<w:r><w:rPr><w:b/></w:rPr><w:t>bold</w:t></w:r>\
                <w:r><w:rPr><w:i/></w:rPr><w:t>italic</w:t></w:r>\
                <w:r><w:rPr><w:strike/></w:rPr><w:t>gone</w:t></w:r>";
    let bytes = docx_with_body(&paragraph(None, runs));

    let mut store = DocumentStore::new();
    let imported = import_docx(&bytes, &ImportOptions::default(), &mut store).unwrap();

    assert!(imported.html.contains("<strong>bold</strong>"));
    assert!(imported.html.contains("<em>italic</em>"));
    assert!(imported.html.contains("<del>gone</del>"));
}

#[test]
fn explicit_false_toggle_is_off() {
    let runs = "<w:r><w:rPr><w:b w:val=\"false\"/></w:rPr><w:t>plain</w:t></w:r>";
    let bytes = docx_with_body(&paragraph(None, runs));

    let mut store = DocumentStore::new();
    let imported = import_docx(&bytes, &ImportOptions::default(), &mut store).unwrap();

    assert!(!imported.html.contains("<strong>"));
}

#[test]
fn color_and_vert_align_are_carried() {
    let runs = "<w:r><w:rPr><w:color w:val=\"FF0000\"/></w:rPr><w:t>red</w:t></w:r>\
                <w:r><w:rPr><w:vertAlign w:val=\"superscript\"/></w:rPr><w:t>2</w:t></w:r>";
    let bytes = docx_with_body(&paragraph(None, runs));

    let mut store = DocumentStore::new();
    let imported = import_docx(&bytes, &ImportOptions::default(), &mut store).unwrap();

    assert!(imported.html.contains("color: #FF0000"));
    assert!(imported.html.contains("<sup>2</sup>"));
}

#[test]
fn page_break_becomes_page_break_div() {
    let runs = "<w:r><w:t>end of chapter</w:t></w:r><w:r><w:br w:type=\"page\"/></w:r>";
    let bytes = docx_with_body(&paragraph(None, runs));

    let mut store = DocumentStore::new();
    let imported = import_docx(&bytes, &ImportOptions::default(), &mut store).unwrap();

    assert!(imported.html.contains("<div class=\"page-break\"></div>"));
}

#[test]
fn single_row_table_imports_as_column_layout() {
    let body = "<w:tbl><w:tr>\
        <w:tc><w:p><w:r><w:t>Left</w:t></w:r></w:p></w:tc>\
        <w:tc><w:p><w:r><w:t>Right</w:t></w:r></w:p></w:tc>\
        </w:tr></w:tbl>";
    let bytes = docx_with_body(body);

    let mut store = DocumentStore::new();
    let imported = import_docx(&bytes, &ImportOptions::default(), &mut store).unwrap();

    assert!(imported.html.contains("column-container"));
    assert_eq!(imported.html.matches("column-content").count(), 2);
}

#[test]
fn multi_row_table_collapses_to_pipe_rows() {
    let body = "<w:tbl>\
        <w:tr><w:tc><w:p><w:r><w:t>A</w:t></w:r></w:p></w:tc>\
             <w:tc><w:p><w:r><w:t>B</w:t></w:r></w:p></w:tc></w:tr>\
        <w:tr><w:tc><w:p><w:r><w:t>C</w:t></w:r></w:p></w:tc>\
             <w:tc><w:p><w:r><w:t>D</w:t></w:r></w:p></w:tc></w:tr>\
        </w:tbl>";
    let bytes = docx_with_body(body);

    let mut store = DocumentStore::new();
    let imported = import_docx(&bytes, &ImportOptions::default(), &mut store).unwrap();

    assert!(imported.html.contains("<p>A | B</p>"));
    assert!(imported.html.contains("<p>C | D</p>"));
}

#[test]
fn embedded_image_is_inlined_as_data_uri() {
    // Smallest valid PNG header is enough; the importer inlines bytes as-is.
    let png: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3];
    let rels = format!(
        "<?xml version=\"1.0\"?>\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Id=\"rId7\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/image\" Target=\"media/image1.png\"/>\
         </Relationships>"
    );
    let document = format!(
        "<?xml version=\"1.0\"?>\
         <w:document xmlns:w=\"{W_NS}\" \
          xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" \
          xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\">\
         <w:body><w:p><w:r><w:drawing>\
         <a:blip r:embed=\"rId7\"/>\
         </w:drawing></w:r></w:p></w:body></w:document>"
    );
    let bytes = build_zip(&[
        ("word/document.xml", document.as_bytes()),
        ("word/_rels/document.xml.rels", rels.as_bytes()),
        ("word/media/image1.png", png),
    ]);

    let mut store = DocumentStore::new();
    let imported = import_docx(&bytes, &ImportOptions::default(), &mut store).unwrap();

    assert!(imported.html.contains("data:image/png;base64,"));
    assert!(imported.metadata.has_images);
}

#[test]
fn missing_media_degrades_to_placeholder() {
    let document = format!(
        "<?xml version=\"1.0\"?>\
         <w:document xmlns:w=\"{W_NS}\" \
          xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" \
          xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\">\
         <w:body><w:p><w:r><w:drawing>\
         <a:blip r:embed=\"rIdMissing\"/>\
         </w:drawing></w:r></w:p></w:body></w:document>"
    );
    let bytes = build_zip(&[("word/document.xml", document.as_bytes())]);

    let mut store = DocumentStore::new();
    let imported = import_docx(&bytes, &ImportOptions::default(), &mut store).unwrap();

    assert!(imported.html.contains("missing-image"));
    assert!(!imported.metadata.has_images);
}

#[test]
fn corrupt_container_is_rejected_and_nothing_is_stored() {
    let mut store = DocumentStore::new();
    let result = import_docx(b"definitely not a zip", &ImportOptions::default(), &mut store);

    match result {
        Err(FormatError::Import { reason, .. }) => {
            assert_eq!(reason, ImportFailure::Corrupt);
        }
        other => panic!("expected corrupt import error, got {other:?}"),
    }
    assert!(store.is_empty());
}

#[test]
fn corrupt_xml_is_rejected() {
    let bytes = build_zip(&[("word/document.xml", b"<w:document>no closing tag".as_slice())]);
    let mut store = DocumentStore::new();
    let result = import_docx(&bytes, &ImportOptions::default(), &mut store);

    assert!(matches!(
        result,
        Err(FormatError::Import {
            reason: ImportFailure::Corrupt,
            ..
        })
    ));
    assert!(store.is_empty());
}

#[test]
fn legacy_doc_is_unsupported() {
    let mut bytes = vec![0xD0, 0xCF, 0x11, 0xE0];
    bytes.extend_from_slice(&[0u8; 64]);

    let mut store = DocumentStore::new();
    let result = import_docx(&bytes, &ImportOptions::default(), &mut store);

    assert!(matches!(
        result,
        Err(FormatError::Import {
            reason: ImportFailure::Unsupported,
            ..
        })
    ));
}

#[test]
fn zip_without_document_part_is_unsupported() {
    let bytes = build_zip(&[("word/styles.xml", b"<w:styles/>".as_slice())]);
    let mut store = DocumentStore::new();
    let result = import_docx(&bytes, &ImportOptions::default(), &mut store);

    assert!(matches!(
        result,
        Err(FormatError::Import {
            reason: ImportFailure::Unsupported,
            ..
        })
    ));
}

#[test]
fn original_is_stored_with_metadata() {
    let bytes = docx_with_body(&paragraph(None, &run("body")));
    let mut store = DocumentStore::new();
    let options = ImportOptions {
        file_name: Some("draft.docx".to_string()),
        preserve_original: true,
    };
    let imported = import_docx(&bytes, &options, &mut store).unwrap();

    assert_eq!(store.len(), 1);
    let stored = store.get(&imported.document_id).unwrap();
    assert_eq!(stored.bytes, bytes);
    assert_eq!(stored.metadata.file_name, "draft.docx");
    assert_eq!(stored.metadata.original_size_bytes, bytes.len() as u64);

    store.remove(&imported.document_id);
    assert!(store.is_empty());
}

#[test]
fn preserve_original_can_be_disabled() {
    let bytes = docx_with_body(&paragraph(None, &run("body")));
    let mut store = DocumentStore::new();
    let options = ImportOptions {
        file_name: None,
        preserve_original: false,
    };
    import_docx(&bytes, &options, &mut store).unwrap();
    assert!(store.is_empty());
}

#[test]
fn plain_text_is_extracted_per_paragraph() {
    let body = format!(
        "{}{}",
        paragraph(Some("Heading1"), &run("Header")),
        paragraph(None, &run("Body text."))
    );
    let bytes = docx_with_body(&body);

    let mut store = DocumentStore::new();
    let imported = import_docx(&bytes, &ImportOptions::default(), &mut store).unwrap();

    assert_eq!(imported.text, "Header\n\nBody text.");
}

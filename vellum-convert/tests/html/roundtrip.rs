//! Round-trip: blocks → HTML → blocks preserves ordered text content and
//! style flags for documents of paragraphs, headings and inline marks.

use vellum_convert::{from_blocks, to_blocks};
use vellum_model::{
    Block, Inline, ParagraphBlock, Spacing, StyleFlags, TextRun,
};

fn run(text: &str, mutate: impl FnOnce(&mut StyleFlags)) -> Inline {
    let mut flags = StyleFlags::default();
    mutate(&mut flags);
    Inline::Run(TextRun::sanitized(text, flags).unwrap())
}

fn paragraph(runs: Vec<Inline>) -> Block {
    Block::Paragraph(ParagraphBlock {
        runs,
        spacing: Spacing::new(None, Some(200)),
        ..ParagraphBlock::default()
    })
}

/// Ordered (text, flags) projection for equivalence comparison.
fn fingerprint(blocks: &[Block]) -> Vec<(String, StyleFlags)> {
    let mut out = Vec::new();
    for block in blocks {
        let runs = match block {
            Block::Paragraph(p) => &p.runs,
            Block::ListItem(item) => &item.runs,
            _ => continue,
        };
        for inline in runs {
            if let Inline::Run(text_run) = inline {
                out.push((text_run.text.clone(), text_run.flags.clone()));
            }
        }
    }
    out
}

#[test]
fn paragraphs_headings_and_marks_round_trip() {
    let original = vec![
        Block::Paragraph(ParagraphBlock::heading(
            1,
            vec![run("Chapter One", |_| {})],
        )),
        paragraph(vec![
            run("It was ", |_| {}),
            run("not", |f| f.italics = true),
            run(" a dark night. ", |_| {}),
            run("Bright,", |f| f.bold = true),
            run(" even.", |_| {}),
        ]),
        Block::Paragraph(ParagraphBlock::heading(2, vec![run("Scene", |_| {})])),
        paragraph(vec![
            run("Struck", |f| f.strike = true),
            run(" and ", |_| {}),
            run("underlined", |f| f.underline = true),
        ]),
    ];

    let html = from_blocks(&original).unwrap();
    let reparsed = to_blocks(&html);

    assert_eq!(fingerprint(&original), fingerprint(&reparsed));
}

#[test]
fn colors_and_fonts_round_trip() {
    let original = vec![paragraph(vec![
        run("crimson", |f| f.color = Some("DC2626".to_string())),
        run(" mono", |f| f.font = Some("Courier New".to_string())),
    ])];

    let html = from_blocks(&original).unwrap();
    let reparsed = to_blocks(&html);

    assert_eq!(fingerprint(&original), fingerprint(&reparsed));
}

#[test]
fn super_and_subscript_round_trip() {
    let original = vec![paragraph(vec![
        run("x", |_| {}),
        run("2", |f| f.set_super_script()),
        run(" and H", |_| {}),
        run("2", |f| f.set_sub_script()),
        run("O", |_| {}),
    ])];

    let html = from_blocks(&original).unwrap();
    let reparsed = to_blocks(&html);

    assert_eq!(fingerprint(&original), fingerprint(&reparsed));
}

#[test]
fn heading_levels_survive() {
    let original: Vec<Block> = (1..=6)
        .map(|level| {
            Block::Paragraph(ParagraphBlock::heading(
                level,
                vec![run(&format!("Level {level}"), |_| {})],
            ))
        })
        .collect();

    let html = from_blocks(&original).unwrap();
    let reparsed = to_blocks(&html);

    let levels: Vec<Option<u8>> = reparsed
        .iter()
        .map(|b| match b {
            Block::Paragraph(p) => p.heading,
            other => panic!("{other:?}"),
        })
        .collect();
    assert_eq!(
        levels,
        vec![Some(1), Some(2), Some(3), Some(4), Some(5), Some(6)]
    );
}

#[test]
fn list_markers_do_not_double_on_round_trip() {
    let source = "<ol><li>First</li><li>Second</li></ol>";
    let once = to_blocks(source);
    let html = from_blocks(&once).unwrap();
    let twice = to_blocks(&html);

    assert_eq!(fingerprint(&once), fingerprint(&twice));
}

#[test]
fn styled_paragraph_classes_round_trip() {
    let source = "<blockquote class=\"epigraph\">All happy families…</blockquote>";
    let once = to_blocks(source);
    let html = from_blocks(&once).unwrap();
    let twice = to_blocks(&html);

    let style = |blocks: &[Block]| match &blocks[0] {
        Block::Paragraph(p) => p.style.clone(),
        other => panic!("{other:?}"),
    };
    assert_eq!(style(&once).as_deref(), Some("Epigraph"));
    assert_eq!(style(&once), style(&twice));
}

#[test]
fn column_grid_round_trips_through_container_markup() {
    let source = "<div class=\"column-container\">\
        <div class=\"column-content\"><p>Left</p></div>\
        <div class=\"column-content\"><p>Right</p></div>\
        </div>";
    let once = to_blocks(source);
    let html = from_blocks(&once).unwrap();
    let twice = to_blocks(&html);

    match (&once[0], &twice[0]) {
        (Block::TableRow(a), Block::TableRow(b)) => {
            assert_eq!(a.cells.len(), b.cells.len());
            assert_eq!(a.cells[0][0].text(), b.cells[0][0].text());
        }
        other => panic!("expected table rows, got {other:?}"),
    }
}

#[test]
fn exported_body_markup_has_the_expected_shape() {
    let blocks = vec![
        Block::Paragraph(ParagraphBlock::heading(1, vec![run("Title", |_| {})])),
        paragraph(vec![
            run("Hello ", |_| {}),
            run("world", |f| f.bold = true),
            run(".", |_| {}),
        ]),
    ];
    let html = from_blocks(&blocks).unwrap();
    assert!(html.contains("vellum-document"));
    assert!(html.contains("<h1>Title</h1>"));
    assert!(html.contains("<strong>world</strong>"));
    assert!(html.contains("Hello "));
}

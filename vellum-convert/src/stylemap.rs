//! Bidirectional table between Word style names and HTML tag/class pairs.
//!
//! Both directions of the pipeline go through this table: import maps a
//! paragraph style id onto the tag+class the editor understands, export maps
//! the tag+class back onto the style id the word processor understands. The
//! table is a total, stable bijection over the enumerated style set; anything
//! outside it degrades — unknown Word styles import as plain paragraphs,
//! unknown class combinations export as the nearest structural equivalent
//! (heading tags pick their heading level, everything else becomes Normal).
//!
//! | Word style             | HTML                          |
//! |------------------------|-------------------------------|
//! | Title                  | `h1.doc-title`                |
//! | Subtitle               | `p.doc-subtitle`              |
//! | Heading 1–6            | `h1`–`h6`                     |
//! | Normal                 | `p`                           |
//! | Body Text              | `p.body-text`                 |
//! | Body Text First Indent | `p.body-text-first-indent`    |
//! | No Spacing             | `p.no-spacing`                |
//! | Quote                  | `blockquote`                  |
//! | Block Quote            | `blockquote.block-quote`      |
//! | Epigraph               | `blockquote.epigraph`         |
//! | List Paragraph         | `p.list-paragraph`            |
//! | List Bullet            | `p.list-bullet`               |
//! | List Number            | `p.list-number`               |
//! | Strong                 | `strong`                      |
//! | Emphasis               | `em`                          |
//! | Book Title             | `span.book-title`             |
//! | Subtle Emphasis        | `span.subtle-emphasis`        |
//! | Subtle Reference       | `span.subtle-reference`       |
//! | Underline              | `u`                           |

/// Whether a style applies to whole paragraphs or character runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    Paragraph,
    Character,
}

/// One row of the bidirectional style table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleMapping {
    /// Word style id as stored in `w:pStyle`/`w:rStyle` (e.g. "Heading1").
    pub style_id: &'static str,
    /// Human-readable Word style name (e.g. "Heading 1").
    pub style_name: &'static str,
    pub tag: &'static str,
    pub class: &'static str,
    pub kind: StyleKind,
}

const fn para(
    style_id: &'static str,
    style_name: &'static str,
    tag: &'static str,
    class: &'static str,
) -> StyleMapping {
    StyleMapping {
        style_id,
        style_name,
        tag,
        class,
        kind: StyleKind::Paragraph,
    }
}

const fn chara(
    style_id: &'static str,
    style_name: &'static str,
    tag: &'static str,
    class: &'static str,
) -> StyleMapping {
    StyleMapping {
        style_id,
        style_name,
        tag,
        class,
        kind: StyleKind::Character,
    }
}

/// The full enumerated style set, in table order.
pub const STYLE_MAPPINGS: &[StyleMapping] = &[
    para("Title", "Title", "h1", "doc-title"),
    para("Subtitle", "Subtitle", "p", "doc-subtitle"),
    para("Heading1", "Heading 1", "h1", ""),
    para("Heading2", "Heading 2", "h2", ""),
    para("Heading3", "Heading 3", "h3", ""),
    para("Heading4", "Heading 4", "h4", ""),
    para("Heading5", "Heading 5", "h5", ""),
    para("Heading6", "Heading 6", "h6", ""),
    para("Normal", "Normal", "p", ""),
    para("BodyText", "Body Text", "p", "body-text"),
    para(
        "BodyTextFirstIndent",
        "Body Text First Indent",
        "p",
        "body-text-first-indent",
    ),
    para("NoSpacing", "No Spacing", "p", "no-spacing"),
    para("Quote", "Quote", "blockquote", ""),
    para("BlockQuote", "Block Quote", "blockquote", "block-quote"),
    para("Epigraph", "Epigraph", "blockquote", "epigraph"),
    para("ListParagraph", "List Paragraph", "p", "list-paragraph"),
    para("ListBullet", "List Bullet", "p", "list-bullet"),
    para("ListNumber", "List Number", "p", "list-number"),
    chara("Strong", "Strong", "strong", ""),
    chara("Emphasis", "Emphasis", "em", ""),
    chara("BookTitle", "Book Title", "span", "book-title"),
    chara("SubtleEmphasis", "Subtle Emphasis", "span", "subtle-emphasis"),
    chara(
        "SubtleReference",
        "Subtle Reference",
        "span",
        "subtle-reference",
    ),
    chara("Underline", "Underline", "u", ""),
];

/// Look up the HTML rendering for a Word style id or name.
///
/// Matching is tolerant of the id/name split ("Heading1" and "Heading 1"
/// both hit the same row) because producers are inconsistent about which
/// they write into `w:pStyle`.
pub fn to_html(word_style: &str) -> Option<(&'static str, &'static str)> {
    let normalized = normalize(word_style);
    STYLE_MAPPINGS
        .iter()
        .find(|m| normalize(m.style_id) == normalized || normalize(m.style_name) == normalized)
        .map(|m| (m.tag, m.class))
}

/// Look up the Word style for an HTML tag + class pair.
pub fn to_word_style(tag: &str, class: &str) -> Option<&'static StyleMapping> {
    STYLE_MAPPINGS
        .iter()
        .find(|m| m.tag.eq_ignore_ascii_case(tag) && m.class == class)
}

/// Look up a mapping by Word style id or name alone.
pub fn to_word_style_by_id(word_style: &str) -> Option<&'static StyleMapping> {
    let normalized = normalize(word_style);
    STYLE_MAPPINGS
        .iter()
        .find(|m| normalize(m.style_id) == normalized || normalize(m.style_name) == normalized)
}

/// Nearest structural equivalent for an unmapped tag: heading tags keep
/// their level, everything else is Normal.
pub fn fallback_for_tag(tag: &str) -> &'static StyleMapping {
    let wanted = match tag {
        "h1" => "Heading1",
        "h2" => "Heading2",
        "h3" => "Heading3",
        "h4" => "Heading4",
        "h5" => "Heading5",
        "h6" => "Heading6",
        _ => "Normal",
    };
    STYLE_MAPPINGS
        .iter()
        .find(|m| m.style_id == wanted)
        .expect("fallback styles are always in the table")
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

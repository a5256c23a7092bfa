//! Document style management for DOCX export.
//!
//! Every entry of the style map gets a concrete definition here so that
//! style-aware consumers see real named styles rather than ad-hoc direct
//! formatting, and so that re-importing an export maps cleanly back onto
//! the same classes.

use docx_rs::*;

/// Document style management
#[derive(Clone, Debug, Default)]
pub struct DocxStyles;

impl DocxStyles {
    pub fn new() -> Self {
        Self
    }

    fn heading(name: &str, display_name: &str, size: usize) -> Style {
        Style::new(name, StyleType::Paragraph)
            .name(display_name)
            .size(size)
            .bold()
    }

    /// Register the full style set on a document.
    pub fn initialize_styles(&self, docx: Docx) -> Docx {
        let title = Style::new("Title", StyleType::Paragraph)
            .name("Title")
            .size(56)
            .align(AlignmentType::Center);

        let subtitle = Style::new("Subtitle", StyleType::Paragraph)
            .name("Subtitle")
            .size(30)
            .color("595959")
            .align(AlignmentType::Center);

        let body_text = Style::new("BodyText", StyleType::Paragraph).name("Body Text");

        let body_text_first_indent = Style::new("BodyTextFirstIndent", StyleType::Paragraph)
            .name("Body Text First Indent")
            .indent(None, Some(SpecialIndentType::FirstLine(360)), None, None);

        let no_spacing = Style::new("NoSpacing", StyleType::Paragraph).name("No Spacing");

        let quote = Style::new("Quote", StyleType::Paragraph)
            .name("Quote")
            .indent(Some(720), None, None, None)
            .italic();

        let block_quote = Style::new("BlockQuote", StyleType::Paragraph)
            .name("Block Quote")
            .indent(Some(720), None, Some(720), None);

        let epigraph = Style::new("Epigraph", StyleType::Paragraph)
            .name("Epigraph")
            .italic()
            .align(AlignmentType::Center);

        let list_paragraph = Style::new("ListParagraph", StyleType::Paragraph)
            .name("List Paragraph")
            .indent(Some(720), None, None, None);

        let list_bullet = Style::new("ListBullet", StyleType::Paragraph)
            .name("List Bullet")
            .indent(Some(720), None, None, None);

        let list_number = Style::new("ListNumber", StyleType::Paragraph)
            .name("List Number")
            .indent(Some(720), None, None, None);

        let strong = Style::new("Strong", StyleType::Character)
            .name("Strong")
            .bold();

        let emphasis = Style::new("Emphasis", StyleType::Character)
            .name("Emphasis")
            .italic();

        let book_title = Style::new("BookTitle", StyleType::Character)
            .name("Book Title")
            .bold()
            .italic();

        let subtle_emphasis = Style::new("SubtleEmphasis", StyleType::Character)
            .name("Subtle Emphasis")
            .italic()
            .color("595959");

        let subtle_reference = Style::new("SubtleReference", StyleType::Character)
            .name("Subtle Reference")
            .color("595959");

        let underline = Style::new("Underline", StyleType::Character)
            .name("Underline")
            .underline("single");

        let hyperlink = Style::new("Hyperlink", StyleType::Character)
            .name("Hyperlink")
            .color("0563C1")
            .underline("single");

        docx.add_style(Self::heading("Heading1", "Heading 1", 32))
            .add_style(Self::heading("Heading2", "Heading 2", 28))
            .add_style(Self::heading("Heading3", "Heading 3", 26))
            .add_style(Self::heading("Heading4", "Heading 4", 24))
            .add_style(Self::heading("Heading5", "Heading 5", 22))
            .add_style(Self::heading("Heading6", "Heading 6", 20))
            .add_style(title)
            .add_style(subtitle)
            .add_style(body_text)
            .add_style(body_text_first_indent)
            .add_style(no_spacing)
            .add_style(quote)
            .add_style(block_quote)
            .add_style(epigraph)
            .add_style(list_paragraph)
            .add_style(list_bullet)
            .add_style(list_number)
            .add_style(strong)
            .add_style(emphasis)
            .add_style(book_title)
            .add_style(subtle_emphasis)
            .add_style(subtle_reference)
            .add_style(underline)
            .add_style(hyperlink)
    }
}

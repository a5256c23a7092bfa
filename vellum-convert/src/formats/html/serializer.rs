//! HTML serialization (blocks → HTML export)
//!
//! Converts a block sequence to semantic HTML5 with embedded CSS.
//! Pipeline: blocks → RcDom → HTML string → complete document template.
//!
//! The markup mirrors what the converter understands, so serializing and
//! re-parsing a document preserves its ordered text content and style flags:
//! paragraph styles come back through the style map, grids come back through
//! the column-container classes, callouts come back through their dedicated
//! class names.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use vellum_model::{
    Alignment, Block, CalloutBlock, ImageBlock, Inline, ListItemBlock, ParagraphBlock, Priority,
    ScreenplayCallout, SpacingPalette, TextRun,
};

use crate::error::FormatError;
use crate::stylemap;

/// Options for HTML serialization
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Document title for the `<title>` element.
    pub title: String,
    /// Optional custom CSS appended after the baseline stylesheet.
    pub custom_css: Option<String>,
}

impl HtmlOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            custom_css: None,
        }
    }
}

/// Serialize blocks to a complete standalone HTML document.
pub fn serialize_to_html(blocks: &[Block], options: &HtmlOptions) -> Result<String, FormatError> {
    let body = render_body(blocks)?;
    Ok(wrap_in_document(&body, options))
}

/// Serialize blocks to body markup only (what the editor loads).
pub fn render_body(blocks: &[Block]) -> Result<String, FormatError> {
    let dom = build_dom(blocks)?;
    serialize_dom(&dom)
}

fn build_dom(blocks: &[Block]) -> Result<RcDom, FormatError> {
    let dom = RcDom::default();
    let container = create_element("div", vec![("class", "vellum-document")]);

    let mut index = 0;
    while index < blocks.len() {
        match &blocks[index] {
            Block::ListItem(first) => {
                // Consecutive items of the same kind regroup into one list.
                let ordered = first.ordinal.is_some();
                let list = create_element(if ordered { "ol" } else { "ul" }, vec![]);
                while index < blocks.len() {
                    let Block::ListItem(item) = &blocks[index] else {
                        break;
                    };
                    if item.ordinal.is_some() != ordered {
                        break;
                    }
                    let li = create_element("li", vec![]);
                    append_inlines(&li, &strip_marker(item));
                    list.children.borrow_mut().push(li);
                    index += 1;
                }
                container.children.borrow_mut().push(list);
                continue;
            }
            block => {
                append_block(&container, block);
                index += 1;
            }
        }
    }

    dom.document.children.borrow_mut().push(container);
    Ok(dom)
}

fn append_block(container: &Handle, block: &Block) {
    match block {
        Block::Paragraph(paragraph) => {
            container
                .children
                .borrow_mut()
                .push(paragraph_element(paragraph));
        }
        Block::ListItem(_) => unreachable!("list items are grouped by build_dom"),
        Block::TableRow(row) => {
            let grid = create_element("div", vec![("class", "column-container")]);
            for cell in &row.cells {
                let column = create_element("div", vec![("class", "column-content")]);
                for paragraph in cell {
                    column
                        .children
                        .borrow_mut()
                        .push(paragraph_element(paragraph));
                }
                grid.children.borrow_mut().push(column);
            }
            container.children.borrow_mut().push(grid);
        }
        Block::Image(image) => {
            container.children.borrow_mut().push(image_element(image));
        }
        Block::PageBreak => {
            let div = create_element("div", vec![("class", "page-break")]);
            container.children.borrow_mut().push(div);
        }
        Block::Callout(callout) => {
            container
                .children
                .borrow_mut()
                .push(callout_element(callout));
        }
    }
}

fn paragraph_element(paragraph: &ParagraphBlock) -> Handle {
    let (tag, class) = paragraph_tag_and_class(paragraph);

    let mut attrs: Vec<(&str, String)> = Vec::new();
    if !class.is_empty() {
        attrs.push(("class", class.to_string()));
    }
    if let Some(alignment) = paragraph.alignment {
        attrs.push(("style", format!("text-align: {}", alignment_name(alignment))));
    }

    let borrowed: Vec<(&str, &str)> = attrs.iter().map(|(k, v)| (*k, v.as_str())).collect();
    let element = create_element(tag, borrowed);
    append_inlines(&element, &paragraph.runs);
    element
}

fn paragraph_tag_and_class(paragraph: &ParagraphBlock) -> (&'static str, &'static str) {
    if let Some(style) = paragraph.style.as_deref() {
        if let Some(found) = stylemap::to_html(style) {
            return found;
        }
    }
    match paragraph.heading {
        Some(1) => ("h1", ""),
        Some(2) => ("h2", ""),
        Some(3) => ("h3", ""),
        Some(4) => ("h4", ""),
        Some(5) => ("h5", ""),
        Some(6) => ("h6", ""),
        _ => ("p", ""),
    }
}

fn alignment_name(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
        Alignment::Justify => "justify",
    }
}

fn append_inlines(parent: &Handle, inlines: &[Inline]) {
    for inline in inlines {
        match inline {
            Inline::LineBreak => {
                parent.children.borrow_mut().push(create_element("br", vec![]));
            }
            Inline::Run(run) => append_run(parent, run),
        }
    }
}

/// Wrap a run's text in the elements that reproduce its flags. Nesting order
/// is arbitrary; the converter merges flags regardless of order.
fn append_run(parent: &Handle, run: &TextRun) {
    let mut node = create_text(&run.text);
    let flags = &run.flags;

    if flags.super_script() {
        node = wrap(node, "sup", vec![]);
    }
    if flags.sub_script() {
        node = wrap(node, "sub", vec![]);
    }
    if flags.strike {
        node = wrap(node, "del", vec![]);
    }
    if flags.underline {
        node = wrap(node, "u", vec![]);
    }
    if flags.italics {
        node = wrap(node, "em", vec![]);
    }
    if flags.bold {
        node = wrap(node, "strong", vec![]);
    }

    // The converter's CSS surface is deliberately narrow: a monospace font
    // comes back through the `code` tag, any other font is presentation-only
    // and does not survive re-parsing.
    if let Some(font) = &flags.font {
        if font == crate::formats::html::inline::MONOSPACE_FONT {
            node = wrap(node, "code", vec![]);
        } else {
            let style = format!("font-family: '{font}'");
            node = wrap(node, "span", vec![("style", style.as_str())]);
        }
    }
    if let Some(color) = &flags.color {
        let style = format!("color: #{color}");
        node = wrap(node, "span", vec![("style", style.as_str())]);
    }

    parent.children.borrow_mut().push(node);
}

fn wrap(child: Handle, tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let element = create_element(tag, attrs);
    element.children.borrow_mut().push(child);
    element
}

fn image_element(image: &ImageBlock) -> Handle {
    let payload = BASE64.encode(&image.bytes);
    let src = format!("data:{};base64,{payload}", image.format.mime());
    let width = image.width.to_string();
    let height = image.height.to_string();
    let style = match image.alignment {
        Alignment::Center => Some("display: block; margin: auto"),
        Alignment::Right => Some("display: block; margin-left: auto"),
        _ => None,
    };

    let mut attrs = vec![
        ("src", src.as_str()),
        ("width", width.as_str()),
        ("height", height.as_str()),
    ];
    if let Some(style) = style {
        attrs.push(("style", style));
    }
    create_element("img", attrs)
}

fn callout_element(callout: &CalloutBlock) -> Handle {
    match callout {
        CalloutBlock::Spacing(spacing) => {
            let variant = if spacing.palette == SpacingPalette::compact() {
                "spacing-indicator compact"
            } else if spacing.palette == SpacingPalette::extended() {
                "spacing-indicator extended"
            } else {
                "spacing-indicator"
            };
            let div = create_element("div", vec![("class", variant)]);
            let label = create_element("span", vec![("class", "spacing-label")]);
            label.children.borrow_mut().push(create_text(&spacing.label));
            div.children.borrow_mut().push(label);
            if let Some(message) = &spacing.message {
                let span = create_element("span", vec![("class", "spacing-message")]);
                span.children.borrow_mut().push(create_text(message));
                div.children.borrow_mut().push(span);
            }
            div
        }
        CalloutBlock::DualCoding(dual) => {
            let class = match dual.priority {
                Priority::High => "dual-coding-callout priority-high",
                Priority::Medium => "dual-coding-callout priority-medium",
                Priority::Low => "dual-coding-callout priority-low",
            };
            let div = create_element("div", vec![("class", class)]);
            let mut push_field = |class: &str, value: &str| {
                let span = create_element("span", vec![("class", class)]);
                span.children.borrow_mut().push(create_text(value));
                div.children.borrow_mut().push(span);
            };
            if let Some(icon) = &dual.icon {
                push_field("callout-icon", icon);
            }
            push_field("callout-title", &dual.title);
            if let Some(reason) = &dual.reason {
                push_field("callout-reason", reason);
            }
            if let Some(context) = &dual.context {
                push_field("callout-context", context);
            }
            if let Some(action) = &dual.action {
                push_field("callout-action", action);
            }
            div
        }
        CalloutBlock::Screenplay(screenplay) => screenplay_element(screenplay),
    }
}

fn screenplay_element(screenplay: &ScreenplayCallout) -> Handle {
    let kind = match screenplay.kind {
        vellum_model::ScreenplayKind::SceneHeading => "scene-heading",
        vellum_model::ScreenplayKind::Action => "action",
        vellum_model::ScreenplayKind::Character => "character",
        vellum_model::ScreenplayKind::Parenthetical => "parenthetical",
        vellum_model::ScreenplayKind::Dialogue => "dialogue",
        vellum_model::ScreenplayKind::Transition => "transition",
        vellum_model::ScreenplayKind::Spacer => "spacer",
    };
    let div = create_element(
        "div",
        vec![("class", "screenplay-block"), ("data-block-type", kind)],
    );
    append_inlines(&div, &screenplay.runs);
    div
}

/// Drop the literal marker run the converter prepends, so regrouped lists do
/// not double their bullets on the next import.
fn strip_marker(item: &ListItemBlock) -> Vec<Inline> {
    let marker = item.marker();
    let mut runs = item.runs.clone();
    if let Some(Inline::Run(first)) = runs.first_mut() {
        if first.text == marker {
            runs.remove(0);
        } else if let Some(stripped) = first.text.strip_prefix(&marker) {
            first.text = stripped.to_string();
        }
    }
    runs
}

// ---------------------------------------------------------------------------
// DOM plumbing

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize the DOM to an HTML string (just the inner content)
fn serialize_dom(dom: &RcDom) -> Result<String, FormatError> {
    let mut output = Vec::new();

    let container = dom
        .document
        .children
        .borrow()
        .first()
        .ok_or_else(|| FormatError::SerializationError("Empty document".to_string()))?
        .clone();

    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    let serializable = SerializableHandle::from(container);
    serialize(&mut output, &serializable, opts)
        .map_err(|e| FormatError::SerializationError(format!("HTML serialization failed: {e}")))?;

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

/// The baseline stylesheet embedded into every HTML export.
pub fn default_css() -> &'static str {
    include_str!("../../../assets/export.css")
}

/// Wrap the content in a complete HTML document with embedded CSS
fn wrap_in_document(body_html: &str, options: &HtmlOptions) -> String {
    let baseline_css = default_css();
    let custom_css = options.custom_css.as_deref().unwrap_or("");
    let escaped_title = escape_html(if options.title.is_empty() {
        "Vellum Document"
    } else {
        &options.title
    });

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="vellum-convert">
  <title>{escaped_title}</title>
  <style>
{baseline_css}
{custom_css}
  </style>
</head>
<body>
{body_html}
</body>
</html>
"#
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

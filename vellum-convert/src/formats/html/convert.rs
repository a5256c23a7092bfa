//! HTML tree → block sequence conversion (the core of the pipeline).
//!
//! The converter is a recursive tree-to-sequence transducer. Walking one
//! container element it is always in one of two states:
//!
//! - **Accumulating**: text nodes and inline descendants are collected into a
//!   pending run buffer without committing anything.
//! - **Flushing**: a block-level child, an image, or end-of-siblings commits
//!   the pending buffer into one paragraph using the container's block
//!   options, then clears it.
//!
//! The accumulator is threaded explicitly through the recursion as
//! `(blocks, pending)` — no captured mutable state — which keeps the flush
//! logic testable in isolation.
//!
//! Dispatch priority per node (first match wins): non-content tags, special
//! CSS classes, `img`, `br`, lists, tables, block tags, inline tags, then
//! transparent recursion for anything else.

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use vellum_model::{
    Alignment, Block, CalloutBlock, DualCodingCallout, Indent, Inline, ListItemBlock,
    ParagraphBlock, Priority, ScreenplayCallout, ScreenplayKind, Spacing, SpacingCallout,
    SpacingPalette, StyleFlags, TableRowBlock, TextRun,
};
use vellum_model::sanitize::collapse_whitespace;

use crate::formats::html::image::{self, ImageRequest};
use crate::formats::html::inline::{derive_style, MONOSPACE_FONT};
use crate::stylemap;

const NON_CONTENT_TAGS: &[&str] = &[
    "style", "script", "link", "meta", "head", "title", "noscript",
];

const INLINE_TAGS: &[&str] = &[
    "span", "strong", "b", "em", "i", "u", "a", "code", "mark", "small", "sup", "sub", "del",
    "ins", "s", "strike", "kbd", "samp",
];

const BLOCK_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "div", "section", "article", "blockquote", "header",
    "footer", "figure", "pre",
];

/// Options applied to every paragraph flushed at the current block level.
#[derive(Debug, Clone, Default)]
struct BlockOptions {
    heading: Option<u8>,
    style: Option<String>,
    alignment: Option<Alignment>,
    spacing: Spacing,
    indent: Option<Indent>,
}

impl BlockOptions {
    /// Options for top-level body content: plain paragraphs with the default
    /// trailing spacing.
    fn body() -> Self {
        Self {
            spacing: Spacing::new(None, Some(200)),
            ..Self::default()
        }
    }

    fn paragraph(&self, runs: Vec<Inline>) -> ParagraphBlock {
        ParagraphBlock {
            runs,
            heading: self.heading,
            style: self.style.clone(),
            alignment: self.alignment,
            spacing: self.spacing,
            indent: self.indent,
            shading: None,
        }
    }
}

/// Convert an HTML string into the block sequence.
///
/// If the whole conversion yields nothing (e.g. markup that is all chrome),
/// the raw text content is reinterpreted as double-newline-delimited
/// plain-text paragraphs so a document is never silently lost.
pub fn convert_html(html: &str) -> Vec<Block> {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
    let body = find_body(&dom.document).unwrap_or_else(|| dom.document.clone());

    let children: Vec<Handle> = body.children.borrow().clone();
    let blocks = convert_block_sequence(&children, &StyleFlags::default(), &BlockOptions::body());
    if !blocks.is_empty() {
        return blocks;
    }

    plain_text_blocks(&text_content(&body))
}

/// Split plain text on blank lines into default paragraphs.
pub fn plain_text_blocks(text: &str) -> Vec<Block> {
    let opts = BlockOptions::body();
    text.split("\n\n")
        .filter_map(|chunk| {
            let collapsed = collapse_whitespace(chunk);
            let trimmed = collapsed.trim();
            let run = TextRun::sanitized(trimmed, StyleFlags::default())?;
            Some(Block::Paragraph(opts.paragraph(vec![Inline::Run(run)])))
        })
        .collect()
}

fn convert_block_sequence(
    children: &[Handle],
    flags: &StyleFlags,
    opts: &BlockOptions,
) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut pending = Vec::new();
    for child in children {
        dispatch_node(child, flags, opts, &mut blocks, &mut pending);
    }
    flush_pending(&mut blocks, &mut pending, opts);
    blocks
}

fn dispatch_node(
    node: &Handle,
    flags: &StyleFlags,
    opts: &BlockOptions,
    blocks: &mut Vec<Block>,
    pending: &mut Vec<Inline>,
) {
    match &node.data {
        NodeData::Text { contents } => {
            append_text(pending, &contents.borrow(), flags);
        }
        NodeData::Element { name, .. } => {
            let tag = name.local.as_ref().to_ascii_lowercase();
            dispatch_element(node, &tag, flags, opts, blocks, pending);
        }
        _ => {}
    }
}

fn dispatch_element(
    node: &Handle,
    tag: &str,
    flags: &StyleFlags,
    opts: &BlockOptions,
    blocks: &mut Vec<Block>,
    pending: &mut Vec<Inline>,
) {
    if NON_CONTENT_TAGS.contains(&tag) {
        return;
    }

    // Recognized classes bypass generic handling entirely.
    let classes = class_list(node);
    if let Some(handled) =
        dispatch_special_class(node, &classes, flags, opts, blocks, pending)
    {
        if handled {
            return;
        }
    }

    match tag {
        "img" => {
            flush_pending(blocks, pending, opts);
            if let Some(resolved) = resolve_image(node, opts) {
                blocks.push(Block::Image(resolved));
            }
        }
        "br" => {
            pending.push(Inline::LineBreak);
        }
        "ul" | "ol" => {
            flush_pending(blocks, pending, opts);
            convert_list(node, tag == "ol", flags, blocks);
        }
        "table" => {
            flush_pending(blocks, pending, opts);
            convert_table(node, flags, blocks);
        }
        _ if BLOCK_TAGS.contains(&tag) => {
            flush_pending(blocks, pending, opts);
            let derived = derive_element_style(node, tag, flags);
            let child_opts = block_options_for(node, tag, &classes, opts);
            let children: Vec<Handle> = node.children.borrow().clone();
            let inner = convert_block_sequence(&children, &derived, &child_opts);

            if inner.is_empty() {
                // A deliberate blank line: an empty <p> directly after a
                // non-empty paragraph is preserved as an explicit empty block.
                let after_content =
                    matches!(blocks.last(), Some(Block::Paragraph(p)) if !p.is_empty());
                if tag == "p" && after_content {
                    blocks.push(Block::Paragraph(ParagraphBlock::blank()));
                }
            } else {
                blocks.extend(inner);
            }
        }
        _ if INLINE_TAGS.contains(&tag) => {
            let derived = derive_element_style(node, tag, flags);
            collect_inline_children(node, &derived, pending);
        }
        _ => {
            // Transparent wrapper: recurse with inherited style.
            let children: Vec<Handle> = node.children.borrow().clone();
            for child in &children {
                dispatch_node(child, flags, opts, blocks, pending);
            }
        }
    }
}

/// Handle the special-class converters. Returns `Some(true)` when the node
/// was consumed, `None`/`Some(false)` to fall through to tag dispatch.
fn dispatch_special_class(
    node: &Handle,
    classes: &[String],
    flags: &StyleFlags,
    opts: &BlockOptions,
    blocks: &mut Vec<Block>,
    pending: &mut Vec<Inline>,
) -> Option<bool> {
    let has = |name: &str| classes.iter().any(|c| c == name);

    if has("page-break") {
        flush_pending(blocks, pending, opts);
        blocks.push(Block::PageBreak);
        return Some(true);
    }
    if has("toc-placeholder") {
        // The table of contents is recomputed at export time; the editor
        // placeholder carries no content of its own.
        flush_pending(blocks, pending, opts);
        return Some(true);
    }
    if has("spacing-indicator") {
        flush_pending(blocks, pending, opts);
        if let Some(callout) = convert_spacing_indicator(node, classes) {
            blocks.push(Block::Callout(CalloutBlock::Spacing(callout)));
        }
        return Some(true);
    }
    if has("dual-coding-callout") {
        flush_pending(blocks, pending, opts);
        if let Some(callout) = convert_dual_coding(node, classes) {
            blocks.push(Block::Callout(CalloutBlock::DualCoding(callout)));
        }
        return Some(true);
    }
    if has("screenplay-block") {
        flush_pending(blocks, pending, opts);
        blocks.push(Block::Callout(CalloutBlock::Screenplay(
            convert_screenplay(node, classes, flags),
        )));
        return Some(true);
    }
    if has("doc-title") || has("doc-subtitle") {
        flush_pending(blocks, pending, opts);
        let style = if has("doc-title") { "Title" } else { "Subtitle" };
        let mut runs = Vec::new();
        collect_inline_children(node, flags, &mut runs);
        trim_run_edges(&mut runs);
        if !runs.is_empty() {
            blocks.push(Block::Paragraph(ParagraphBlock {
                runs,
                style: Some(style.to_string()),
                spacing: Spacing::new(None, Some(200)),
                ..ParagraphBlock::default()
            }));
        }
        return Some(true);
    }
    if has("column-container") {
        flush_pending(blocks, pending, opts);
        convert_columns(node, flags, opts, blocks, pending);
        return Some(true);
    }
    if has("column-drag-handle") {
        // Editor chrome, never document content.
        return Some(true);
    }

    None
}

// ---------------------------------------------------------------------------
// Inline accumulation

fn append_text(pending: &mut Vec<Inline>, raw: &str, flags: &StyleFlags) {
    let collapsed = collapse_whitespace(raw);
    let text = if pending_is_empty_of_text(pending) {
        collapsed.trim_start().to_string()
    } else {
        collapsed
    };
    if text.is_empty() {
        return;
    }
    if let Some(run) = TextRun::sanitized(&text, flags.clone()) {
        pending.push(Inline::Run(run));
    }
}

fn pending_is_empty_of_text(pending: &[Inline]) -> bool {
    pending.iter().all(|inline| match inline {
        Inline::Run(run) => run.text.trim().is_empty(),
        Inline::LineBreak => false,
    })
}

fn collect_inline_children(node: &Handle, flags: &StyleFlags, out: &mut Vec<Inline>) {
    let children: Vec<Handle> = node.children.borrow().clone();
    for child in &children {
        match &child.data {
            NodeData::Text { contents } => append_text(out, &contents.borrow(), flags),
            NodeData::Element { name, .. } => {
                let tag = name.local.as_ref().to_ascii_lowercase();
                if NON_CONTENT_TAGS.contains(&tag.as_str()) || tag == "img" {
                    continue;
                }
                if tag == "br" {
                    out.push(Inline::LineBreak);
                    continue;
                }
                let derived = derive_element_style(child, &tag, flags);
                collect_inline_children(child, &derived, out);
            }
            _ => {}
        }
    }
}

fn flush_pending(blocks: &mut Vec<Block>, pending: &mut Vec<Inline>, opts: &BlockOptions) {
    let mut runs = std::mem::take(pending);
    trim_run_edges(&mut runs);
    if runs.is_empty() {
        return;
    }
    blocks.push(Block::Paragraph(opts.paragraph(runs)));
}

/// Trim whitespace at the paragraph edges: leading whitespace on the first
/// run, trailing on the last, dropping runs that end up empty.
fn trim_run_edges(runs: &mut Vec<Inline>) {
    while let Some(Inline::Run(run)) = runs.first_mut() {
        let trimmed = run.text.trim_start();
        if trimmed.is_empty() {
            runs.remove(0);
        } else {
            if trimmed.len() != run.text.len() {
                run.text = trimmed.to_string();
            }
            break;
        }
    }
    while let Some(Inline::Run(run)) = runs.last_mut() {
        let trimmed = run.text.trim_end();
        if trimmed.is_empty() {
            runs.pop();
        } else {
            if trimmed.len() != run.text.len() {
                run.text = trimmed.to_string();
            }
            break;
        }
    }
}

// ---------------------------------------------------------------------------
// Per-tag block handling

fn derive_element_style(node: &Handle, tag: &str, flags: &StyleFlags) -> StyleFlags {
    let class_attr = attr_value(node, "class");
    let style_attr = attr_value(node, "style");
    derive_style(tag, class_attr.as_deref(), style_attr.as_deref(), flags)
}

fn block_options_for(
    node: &Handle,
    tag: &str,
    classes: &[String],
    parent: &BlockOptions,
) -> BlockOptions {
    let mut opts = BlockOptions {
        alignment: infer_alignment(node, classes).or(parent.alignment),
        spacing: Spacing::new(None, Some(200)),
        ..BlockOptions::default()
    };

    match tag {
        "h1" => {
            opts.heading = Some(1);
            opts.spacing = Spacing::new(Some(400), Some(240));
        }
        "h2" => {
            opts.heading = Some(2);
            opts.spacing = Spacing::new(Some(320), Some(160));
        }
        "h3" => {
            opts.heading = Some(3);
            opts.spacing = Spacing::new(Some(240), Some(120));
        }
        "h4" | "h5" | "h6" => {
            opts.heading = Some(tag[1..].parse().unwrap_or(6));
        }
        "blockquote" => {
            opts.spacing = Spacing::new(Some(160), Some(160));
            opts.indent = Some(Indent::left(720));
            opts.style = Some("Quote".to_string());
        }
        _ => {}
    }

    // The inverse of the import mapping: a known tag+class combination keys
    // back onto its Word paragraph style.
    for class in classes {
        if let Some(mapping) = stylemap::to_word_style(tag, class) {
            if matches!(mapping.kind, stylemap::StyleKind::Paragraph) {
                opts.style = Some(mapping.style_id.to_string());
                match mapping.style_id {
                    "NoSpacing" => opts.spacing = Spacing::default(),
                    "BodyTextFirstIndent" => {
                        opts.indent = Some(Indent {
                            first_line: Some(360),
                            ..Indent::default()
                        });
                    }
                    _ => {}
                }
                break;
            }
        }
    }

    opts
}

/// Explicit `align` attribute first, then a `text-align` declaration, then a
/// centering class.
fn infer_alignment(node: &Handle, classes: &[String]) -> Option<Alignment> {
    if let Some(align) = attr_value(node, "align") {
        let lowered = align.to_ascii_lowercase();
        if lowered.contains("center") {
            return Some(Alignment::Center);
        }
        if lowered.contains("right") {
            return Some(Alignment::Right);
        }
        if lowered.contains("justify") {
            return Some(Alignment::Justify);
        }
    }
    if let Some(style) = attr_value(node, "style") {
        let lowered = style.to_ascii_lowercase();
        for declaration in lowered.split(';') {
            let Some((property, value)) = declaration.split_once(':') else {
                continue;
            };
            if property.trim() != "text-align" {
                continue;
            }
            return match value.trim() {
                v if v.contains("center") => Some(Alignment::Center),
                v if v.contains("right") => Some(Alignment::Right),
                v if v.contains("justify") => Some(Alignment::Justify),
                v if v.contains("left") => Some(Alignment::Left),
                _ => None,
            };
        }
    }
    if classes.iter().any(|c| c == "center" || c == "text-center") {
        return Some(Alignment::Center);
    }
    None
}

fn resolve_image(node: &Handle, opts: &BlockOptions) -> Option<vellum_model::ImageBlock> {
    let src = attr_value(node, "src")?;
    let style = attr_value(node, "style");
    let width = attr_value(node, "width");
    let height = attr_value(node, "height");
    image::resolve(&ImageRequest {
        src: &src,
        style: style.as_deref(),
        width_attr: width.as_deref(),
        height_attr: height.as_deref(),
        ancestor_alignment: opts.alignment,
    })
}

fn convert_list(node: &Handle, ordered: bool, flags: &StyleFlags, blocks: &mut Vec<Block>) {
    let mut ordinal = 0u32;
    let children: Vec<Handle> = node.children.borrow().clone();
    for child in &children {
        if element_tag(child).as_deref() != Some("li") {
            continue;
        }
        ordinal += 1;

        let mut runs = Vec::new();
        collect_inline_children(child, flags, &mut runs);
        trim_run_edges(&mut runs);

        if runs.is_empty() {
            // Fall back to the flattened, whitespace-collapsed text content.
            let collapsed = collapse_whitespace(&text_content(child));
            let trimmed = collapsed.trim();
            if let Some(run) = TextRun::sanitized(trimmed, flags.clone()) {
                runs.push(Inline::Run(run));
            }
        }
        if runs.is_empty() {
            continue;
        }

        let item = ListItemBlock {
            ordinal: ordered.then_some(ordinal),
            runs,
        };
        // The literal marker is part of the item text so downstream
        // serializers never have to re-derive it.
        let mut prefixed = vec![Inline::Run(TextRun {
            text: item.marker(),
            flags: StyleFlags::default(),
        })];
        prefixed.extend(item.runs);
        blocks.push(Block::ListItem(ListItemBlock {
            ordinal: item.ordinal,
            runs: prefixed,
        }));
    }
}

/// Ordinary tables collapse to one pipe-joined paragraph per row; true grid
/// structure is reserved for the column-layout feature.
fn convert_table(node: &Handle, flags: &StyleFlags, blocks: &mut Vec<Block>) {
    let opts = BlockOptions::body();
    for row in descendants_with_tag(node, "tr") {
        let mut cells = Vec::new();
        let row_children: Vec<Handle> = row.children.borrow().clone();
        for cell in &row_children {
            match element_tag(cell).as_deref() {
                Some("td") | Some("th") => {
                    let collapsed = collapse_whitespace(&text_content(cell));
                    cells.push(collapsed.trim().to_string());
                }
                _ => {}
            }
        }
        let joined = cells.join(" | ");
        if joined.trim().is_empty() {
            continue;
        }
        if let Some(run) = TextRun::sanitized(&joined, flags.clone()) {
            blocks.push(Block::Paragraph(opts.paragraph(vec![Inline::Run(run)])));
        }
    }
}

fn convert_columns(
    node: &Handle,
    flags: &StyleFlags,
    opts: &BlockOptions,
    blocks: &mut Vec<Block>,
    pending: &mut Vec<Inline>,
) {
    let children: Vec<Handle> = node.children.borrow().clone();
    let columns: Vec<Handle> = children
        .iter()
        .filter(|c| has_class(c, "column-content"))
        .cloned()
        .collect();

    match columns.len() {
        // No recognizable columns: process everything except editor chrome.
        0 => {
            for child in &children {
                if has_class(child, "column-drag-handle") {
                    continue;
                }
                dispatch_node(child, flags, opts, blocks, pending);
            }
            flush_pending(blocks, pending, opts);
        }
        // A single column collapses to plain sequential content.
        1 => {
            let inner: Vec<Handle> = columns[0].children.borrow().clone();
            for child in &inner {
                dispatch_node(child, flags, opts, blocks, pending);
            }
            flush_pending(blocks, pending, opts);
        }
        _ => {
            let cells: Vec<Vec<ParagraphBlock>> = columns
                .iter()
                .map(|column| {
                    let inner: Vec<Handle> = column.children.borrow().clone();
                    let converted =
                        convert_block_sequence(&inner, flags, &BlockOptions::body());
                    paragraphs_of(converted)
                })
                .collect();
            blocks.push(Block::TableRow(TableRowBlock { cells }));
        }
    }
}

/// Reduce a block sequence to the paragraphs a grid cell can hold.
fn paragraphs_of(blocks: Vec<Block>) -> Vec<ParagraphBlock> {
    blocks
        .into_iter()
        .filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            Block::ListItem(item) => Some(ParagraphBlock::new(item.runs)),
            _ => None,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Special class converters

fn convert_spacing_indicator(node: &Handle, classes: &[String]) -> Option<SpacingCallout> {
    let label = descendant_text_by_class(node, "spacing-label");
    let message = descendant_text_by_class(node, "spacing-message");

    let palette = if classes.iter().any(|c| c == "compact") {
        SpacingPalette::compact()
    } else if classes.iter().any(|c| c == "extended") {
        SpacingPalette::extended()
    } else {
        SpacingPalette::neutral()
    };

    let label = label.unwrap_or_default();
    if label.is_empty() && message.is_none() {
        return None;
    }
    Some(SpacingCallout {
        label,
        message,
        palette,
    })
}

fn convert_dual_coding(node: &Handle, classes: &[String]) -> Option<DualCodingCallout> {
    let icon = descendant_text_by_class(node, "callout-icon");
    let title = descendant_text_by_class(node, "callout-title");
    let reason = descendant_text_by_class(node, "callout-reason");
    let context = descendant_text_by_class(node, "callout-context");
    let action = descendant_text_by_class(node, "callout-action");

    let priority = descendant_text_by_class(node, "callout-priority")
        .and_then(|text| priority_from_name(text.trim()))
        .or_else(|| {
            classes.iter().find_map(|class| {
                class
                    .strip_prefix("priority-")
                    .and_then(priority_from_name)
            })
        })
        .unwrap_or(Priority::Medium);

    let title = title.unwrap_or_default();
    if title.is_empty() && reason.is_none() && action.is_none() {
        return None;
    }
    Some(DualCodingCallout {
        icon,
        title,
        priority,
        reason,
        context,
        action,
    })
}

fn priority_from_name(name: &str) -> Option<Priority> {
    match name.to_ascii_lowercase().as_str() {
        "high" => Some(Priority::High),
        "medium" => Some(Priority::Medium),
        "low" => Some(Priority::Low),
        _ => None,
    }
}

fn convert_screenplay(node: &Handle, classes: &[String], flags: &StyleFlags) -> ScreenplayCallout {
    let kind = attr_value(node, "data-block-type")
        .and_then(|v| ScreenplayKind::from_name(v.trim()))
        .or_else(|| {
            classes
                .iter()
                .find_map(|class| ScreenplayKind::from_name(class))
        })
        .unwrap_or(ScreenplayKind::Action);

    // Screenplay text is always monospace.
    let mut base = flags.clone();
    base.font = Some(MONOSPACE_FONT.to_string());

    let mut runs = Vec::new();
    collect_inline_children(node, &base, &mut runs);
    trim_run_edges(&mut runs);

    if kind.uppercase() {
        for inline in &mut runs {
            if let Inline::Run(run) = inline {
                run.text = run.text.to_uppercase();
            }
        }
    }

    ScreenplayCallout { kind, runs }
}

// ---------------------------------------------------------------------------
// DOM helpers

fn find_body(node: &Handle) -> Option<Handle> {
    if element_tag(node).as_deref() == Some("body") {
        return Some(node.clone());
    }
    let children: Vec<Handle> = node.children.borrow().clone();
    children.iter().find_map(find_body)
}

fn element_tag(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref().to_ascii_lowercase()),
        _ => None,
    }
}

fn attr_value(node: &Handle, wanted: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.as_ref().eq_ignore_ascii_case(wanted))
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

fn class_list(node: &Handle) -> Vec<String> {
    attr_value(node, "class")
        .map(|value| value.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

fn has_class(node: &Handle, class: &str) -> bool {
    class_list(node).iter().any(|c| c == class)
}

/// Descendant text, skipping non-content subtrees (style/script/…).
fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Element { name, .. }
            if NON_CONTENT_TAGS.contains(&name.local.as_ref().to_ascii_lowercase().as_str()) => {}
        _ => {
            let children: Vec<Handle> = node.children.borrow().clone();
            for child in &children {
                collect_text(child, out);
            }
        }
    }
}

fn descendants_with_tag(node: &Handle, tag: &str) -> Vec<Handle> {
    let mut found = Vec::new();
    collect_descendants_with_tag(node, tag, &mut found);
    found
}

fn collect_descendants_with_tag(node: &Handle, tag: &str, out: &mut Vec<Handle>) {
    let children: Vec<Handle> = node.children.borrow().clone();
    for child in &children {
        if element_tag(child).as_deref() == Some(tag) {
            out.push(child.clone());
        } else {
            collect_descendants_with_tag(child, tag, out);
        }
    }
}

fn descendant_text_by_class(node: &Handle, class: &str) -> Option<String> {
    let found = find_descendant_by_class(node, class)?;
    let collapsed = collapse_whitespace(&text_content(&found));
    let trimmed = collapsed.trim().to_string();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn find_descendant_by_class(node: &Handle, class: &str) -> Option<Handle> {
    let children: Vec<Handle> = node.children.borrow().clone();
    for child in &children {
        if has_class(child, class) {
            return Some(child.clone());
        }
        if let Some(found) = find_descendant_by_class(child, class) {
            return Some(found);
        }
    }
    None
}

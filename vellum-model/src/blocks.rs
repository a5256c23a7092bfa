//! Core data structures for the block-model document representation.

use serde::{Deserialize, Serialize};

use crate::flags::StyleFlags;
use crate::sanitize::strip_control_chars;

/// One structural unit of the destination document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(ParagraphBlock),
    ListItem(ListItemBlock),
    TableRow(TableRowBlock),
    Image(ImageBlock),
    PageBreak,
    Callout(CalloutBlock),
}

/// A paragraph: the workhorse block. Headings, quotes, titles and plain body
/// text are all paragraphs distinguished by `heading` or `style`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphBlock {
    pub runs: Vec<Inline>,
    /// Heading level 1–6 when this paragraph is a heading.
    pub heading: Option<u8>,
    /// Word paragraph style id (e.g. "Title", "Quote") when one applies.
    pub style: Option<String>,
    pub alignment: Option<Alignment>,
    pub spacing: Spacing,
    pub indent: Option<Indent>,
    pub shading: Option<Shading>,
}

impl ParagraphBlock {
    pub fn new(runs: Vec<Inline>) -> Self {
        Self {
            runs,
            ..Self::default()
        }
    }

    /// A deliberate blank line: no runs, default options.
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn heading(level: u8, runs: Vec<Inline>) -> Self {
        Self {
            runs,
            heading: Some(level.clamp(1, 6)),
            ..Self::default()
        }
    }

    /// True when the paragraph carries no visible content at all.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|inline| match inline {
            Inline::Run(run) => run.text.trim().is_empty(),
            Inline::LineBreak => false,
        })
    }

    /// The concatenated text of every run, breaks rendered as newlines.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for inline in &self.runs {
            match inline {
                Inline::Run(run) => out.push_str(&run.text),
                Inline::LineBreak => out.push('\n'),
            }
        }
        out
    }
}

/// Inline content inside a paragraph: a styled run or an explicit line break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Inline {
    Run(TextRun),
    LineBreak,
}

/// A contiguous span of text sharing one resolved set of style flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub flags: StyleFlags,
}

impl TextRun {
    /// Build a run from raw text, stripping forbidden control characters.
    /// Returns `None` when nothing is left — empty runs never enter the model.
    pub fn sanitized(text: &str, flags: StyleFlags) -> Option<Self> {
        let text = strip_control_chars(text);
        if text.is_empty() {
            None
        } else {
            Some(Self { text, flags })
        }
    }

    pub fn plain(text: &str) -> Option<Self> {
        Self::sanitized(text, StyleFlags::default())
    }
}

/// A list item carrying its literal marker: `ordinal` is the 1-based number
/// for ordered lists, `None` for bullet items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItemBlock {
    pub ordinal: Option<u32>,
    pub runs: Vec<Inline>,
}

impl ListItemBlock {
    /// The literal prefix rendered before the item text.
    pub fn marker(&self) -> String {
        match self.ordinal {
            Some(n) => format!("{n}. "),
            None => "\u{2022} ".to_string(),
        }
    }
}

/// One row of a true grid. Only the column-layout feature produces these;
/// ordinary HTML tables are collapsed to pipe-joined paragraphs upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRowBlock {
    pub cells: Vec<Vec<ParagraphBlock>>,
}

/// Raster image payload with resolved display dimensions in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub alignment: Alignment,
}

/// Raster formats the destination container accepts natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Bmp => "image/bmp",
        }
    }
}

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

/// Paragraph spacing in twentieths of a point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spacing {
    pub before: Option<u32>,
    pub after: Option<u32>,
    pub line: Option<u32>,
}

impl Spacing {
    pub fn new(before: Option<u32>, after: Option<u32>) -> Self {
        Self {
            before,
            after,
            line: None,
        }
    }
}

/// Paragraph indentation in twentieths of a point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indent {
    pub left: Option<i32>,
    pub right: Option<i32>,
    pub first_line: Option<i32>,
}

impl Indent {
    pub fn left(amount: i32) -> Self {
        Self {
            left: Some(amount),
            ..Self::default()
        }
    }
}

/// Background fill for a shaded paragraph, hex without `#`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shading {
    pub fill: String,
}

/// A specialized, visually distinct block beyond plain paragraphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CalloutBlock {
    Spacing(SpacingCallout),
    DualCoding(DualCodingCallout),
    Screenplay(ScreenplayCallout),
}

/// A spacing-indicator callout: a shaded label line with an optional
/// explanatory message line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacingCallout {
    pub label: String,
    pub message: Option<String>,
    pub palette: SpacingPalette,
}

/// Fill/text/accent colors for a spacing callout, hex without `#`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacingPalette {
    pub fill: String,
    pub text: String,
    pub accent: String,
}

impl SpacingPalette {
    /// Palette for a "compact" spacing suggestion.
    pub fn compact() -> Self {
        Self {
            fill: "FDE8E8".into(),
            text: "9B1C1C".into(),
            accent: "E02424".into(),
        }
    }

    /// Palette for an "extended" spacing suggestion.
    pub fn extended() -> Self {
        Self {
            fill: "E1EFFE".into(),
            text: "1E429F".into(),
            accent: "3F83F8".into(),
        }
    }

    /// Neutral palette when no variant class is present.
    pub fn neutral() -> Self {
        Self {
            fill: "F3F4F6".into(),
            text: "374151".into(),
            accent: "6B7280".into(),
        }
    }
}

/// A dual-coding suggestion callout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualCodingCallout {
    pub icon: Option<String>,
    pub title: String,
    pub priority: Priority,
    pub reason: Option<String>,
    pub context: Option<String>,
    pub action: Option<String>,
}

/// Priority of a dual-coding suggestion, with its accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn accent(&self) -> &'static str {
        match self {
            Priority::High => "DC2626",
            Priority::Medium => "D97706",
            Priority::Low => "6B7280",
        }
    }
}

/// One screenplay element with its fixed formatting recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenplayCallout {
    pub kind: ScreenplayKind,
    pub runs: Vec<Inline>,
}

/// Screenplay element types, each with standard-format layout rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenplayKind {
    SceneHeading,
    Action,
    Character,
    Parenthetical,
    Dialogue,
    Transition,
    Spacer,
}

impl ScreenplayKind {
    /// Left indent in twentieths of a point per standard screenplay format:
    /// character names sit deepest, parentheticals between them and dialogue.
    pub fn left_indent(&self) -> i32 {
        match self {
            ScreenplayKind::SceneHeading | ScreenplayKind::Action | ScreenplayKind::Spacer => 0,
            ScreenplayKind::Character => 3168,
            ScreenplayKind::Parenthetical => 2448,
            ScreenplayKind::Dialogue => 1440,
            ScreenplayKind::Transition => 0,
        }
    }

    /// Scene headings and character names are upper-cased.
    pub fn uppercase(&self) -> bool {
        matches!(
            self,
            ScreenplayKind::SceneHeading | ScreenplayKind::Character | ScreenplayKind::Transition
        )
    }

    pub fn alignment(&self) -> Alignment {
        match self {
            ScreenplayKind::Transition => Alignment::Right,
            _ => Alignment::Left,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "scene-heading" => Some(ScreenplayKind::SceneHeading),
            "action" => Some(ScreenplayKind::Action),
            "character" => Some(ScreenplayKind::Character),
            "parenthetical" => Some(ScreenplayKind::Parenthetical),
            "dialogue" => Some(ScreenplayKind::Dialogue),
            "transition" => Some(ScreenplayKind::Transition),
            "spacer" => Some(ScreenplayKind::Spacer),
            _ => None,
        }
    }
}

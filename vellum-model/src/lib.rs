//! Core document model for the vellum pipeline
//!
//!     This crate defines the word-processor-native representation that every
//!     conversion in the toolchain goes through: an ordered sequence of blocks
//!     (paragraphs, headings-as-paragraphs, list items, table rows, images,
//!     page breaks, callouts), where each paragraph carries a list of text
//!     runs with resolved inline style flags.
//!
//!     The model is deliberately flat. A word processor does not nest
//!     sections the way HTML nests elements; it consumes a linear stream of
//!     styled paragraphs. Converters therefore do the flattening (and the
//!     inverse reconstruction) and this crate only has to describe the
//!     stream faithfully.
//!
//! Ownership
//!
//!     Style flags are value types: every conversion step derives a new
//!     merged copy for a child node and never hands out references into the
//!     parent's flags. The originals store is an owned map the caller passes
//!     into import/export calls; nothing in this workspace keeps process-wide
//!     mutable state.

pub mod blocks;
pub mod flags;
pub mod metadata;
pub mod sanitize;
pub mod store;

pub use blocks::{
    Alignment, Block, CalloutBlock, DualCodingCallout, ImageBlock, ImageFormat, Indent, Inline,
    ListItemBlock, ParagraphBlock, Priority, ScreenplayCallout, ScreenplayKind, Shading, Spacing,
    SpacingCallout, SpacingPalette, TableRowBlock, TextRun,
};
pub use flags::StyleFlags;
pub use metadata::{DocumentMetadata, TocEntry};
pub use store::{new_document_id, DocumentStore, StoredOriginal};

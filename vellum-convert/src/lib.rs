//! Bidirectional HTML/DOCX conversion for vellum documents
//!
//!     This crate is the document pipeline of the vellum writing toolchain:
//!     it imports word-processor (.docx) files into styled HTML the editor
//!     can host, and exports edited HTML back to .docx or standalone HTML
//!     while preserving formatting intent.
//!
//!     The hard part is not either file format — it is the translation
//!     layer in the middle: converting an arbitrary, loosely structured
//!     HTML tree into the linear sequence of styled blocks a word processor
//!     consumes, with inline formatting inherited correctly, and doing the
//!     inverse mapping on import so the round trip stays consistent.
//!
//! Architecture
//!
//!     All conversions go through the block model defined in vellum-model.
//!     Formats adapt their own representation to that model and back; the
//!     model-side logic (style-flag merging, run flushing, sanitization)
//!     lives in one place and is tested in isolation.
//!
//!     The file structure:
//!     .
//!     ├── error.rs                # FormatError and the import taxonomy
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── stylemap.rs             # Word style ↔ HTML tag/class bijection
//!     ├── analysis.rs             # scoring collaborator boundary types
//!     ├── pipeline.rs             # import/export entry points
//!     ├── formats
//!     │   ├── html                # editor surface: converter + serializer
//!     │   ├── docx                # container surface: reader + assembler
//!     │   └── text                # plain-text projection
//!
//! Library Choices
//!
//!     Parsing and serializing the formats is offloaded to specialized
//!     crates wherever one exists: html5ever/rcdom for the HTML tree,
//!     docx-rs for OOXML packaging, zip + roxmltree for reading the
//!     container, image for raster probing and re-encoding. This crate's
//!     own code is the adaptation layer between those ASTs and the block
//!     model — it never hand-rolls a format another crate already owns.
//!
//!     This is a pure library: no printing, no environment access, no
//!     network. Callers own all I/O, including where exported bytes land.

pub mod analysis;
pub mod error;
pub mod format;
pub mod formats;
pub mod pipeline;
pub mod registry;
pub mod stylemap;

pub use error::{FormatError, ImportFailure};
pub use format::{Format, SerializedDocument};
pub use formats::docx::{import_docx, AssembleOptions, ImportOptions, ImportedDocument};
pub use pipeline::{
    export_docx, export_html, sanitize_file_name, ExportMode, ExportRequest, ExportedFile,
    DOCX_MIME, HTML_MIME,
};
pub use registry::FormatRegistry;

/// Convert editor HTML into the block model.
///
/// # Information Loss
///
/// The block model is linear and word-processor-shaped. The following HTML
/// information does not survive:
/// - Nesting of block containers (flattened to a sequence)
/// - CSS beyond the restricted declaration set
/// - Cell structure of ordinary tables (pipe-joined; the column layout is
///   the one feature that keeps a true grid)
pub fn to_blocks(html: &str) -> Vec<vellum_model::Block> {
    formats::html::convert::convert_html(html)
}

/// Serialize the block model back to editor-compatible body HTML.
pub fn from_blocks(blocks: &[vellum_model::Block]) -> Result<String, FormatError> {
    formats::html::serializer::render_body(blocks)
}

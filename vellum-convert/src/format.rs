//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! The trait provides a uniform interface over the block model: parsing turns raw input
//! bytes into a block sequence, serialization turns a block sequence into text or binary
//! output. Input is bytes rather than text because the word-processor container is binary.

use std::collections::HashMap;

use vellum_model::Block;

use crate::error::FormatError;

/// Serialized output produced by a [`Format`] implementation.
pub enum SerializedDocument {
    /// UTF-8 text output (e.g., HTML, plain text)
    Text(String),
    /// Binary output (e.g., .docx)
    Binary(Vec<u8>),
}

impl SerializedDocument {
    /// Consume the serialized output and return the underlying bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            SerializedDocument::Text(text) => text.into_bytes(),
            SerializedDocument::Binary(bytes) => bytes,
        }
    }
}

/// Trait for document formats
///
/// Implementors provide conversion between raw input and the block model.
/// Formats can support parsing, serialization, or both.
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "docx", "html", "text")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (bytes → blocks)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (blocks → output)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse raw input into a block sequence.
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &[u8]) -> Result<Vec<Block>, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a block sequence into this format's output.
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _blocks: &[Block]) -> Result<SerializedDocument, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serialize a block sequence, optionally using extra parameters.
    ///
    /// Formats without tunable output can rely on the default implementation,
    /// which delegates to [`Format::serialize`] when no options are given.
    fn serialize_with_options(
        &self,
        blocks: &[Block],
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        if options.is_empty() {
            self.serialize(blocks)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}

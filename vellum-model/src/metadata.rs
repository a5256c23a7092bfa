//! Import-time document metadata and derived export records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Facts recorded once when a document is imported. Immutable afterward;
/// lives in the [`DocumentStore`](crate::store::DocumentStore) next to the
/// original binary until the caller releases both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
    pub original_size_bytes: u64,
    pub has_images: bool,
    /// Custom style classes found in the imported HTML, for UI display.
    pub detected_styles: Vec<String>,
}

impl DocumentMetadata {
    pub fn new(file_name: impl Into<String>, original_size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            uploaded_at: Utc::now(),
            original_size_bytes,
            has_images: false,
            detected_styles: Vec::new(),
        }
    }
}

/// One table-of-contents line. Recomputed on every export from the block
/// sequence; the page number is an estimate from a characters-per-page
/// heuristic, not a promise about the consumer's pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub text: String,
    /// Heading depth 1–3; deeper headings are not listed.
    pub level: u8,
    pub page_number: u32,
}

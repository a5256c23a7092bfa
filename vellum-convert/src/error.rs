//! Error types for format operations

use std::fmt;

/// Why an import was rejected outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFailure {
    /// The container or its XML could not be parsed.
    Corrupt,
    /// The file is recognizable but not a format we read (e.g. legacy .doc).
    Unsupported,
}

impl ImportFailure {
    pub fn reason(&self) -> &'static str {
        match self {
            ImportFailure::Corrupt => "corrupt",
            ImportFailure::Unsupported => "unsupported",
        }
    }
}

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Import rejected at the document level; nothing was persisted
    Import {
        reason: ImportFailure,
        detail: String,
    },
    /// Error during serialization
    SerializationError(String),
    /// Format does not support the requested direction
    NotSupported(String),
}

impl FormatError {
    pub fn corrupt(detail: impl Into<String>) -> Self {
        FormatError::Import {
            reason: ImportFailure::Corrupt,
            detail: detail.into(),
        }
    }

    pub fn unsupported_input(detail: impl Into<String>) -> Self {
        FormatError::Import {
            reason: ImportFailure::Unsupported,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::Import { reason, detail } => {
                write!(f, "Import failed ({}): {detail}", reason.reason())
            }
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            FormatError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

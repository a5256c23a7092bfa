//! Keyed storage for imported originals.
//!
//! The store holds the original .docx bytes and the metadata captured at
//! import, keyed by a generated document id. It is a plain owned value the
//! caller threads through import/export calls — there is no process-wide
//! singleton, so tests and multi-document callers get isolation for free.
//! Entries are released only by explicit `remove` or `clear`.

use std::collections::HashMap;

use uuid::Uuid;

use crate::metadata::DocumentMetadata;

/// Generate a fresh document id.
pub fn new_document_id() -> String {
    Uuid::new_v4().to_string()
}

/// Original bytes plus the metadata recorded at import time.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredOriginal {
    pub bytes: Vec<u8>,
    pub metadata: DocumentMetadata,
}

/// Owned map of `document id → original`.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    entries: HashMap<String, StoredOriginal>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an original under `id`, replacing any previous entry.
    pub fn insert(&mut self, id: impl Into<String>, bytes: Vec<u8>, metadata: DocumentMetadata) {
        self.entries
            .insert(id.into(), StoredOriginal { bytes, metadata });
    }

    pub fn get(&self, id: &str) -> Option<&StoredOriginal> {
        self.entries.get(id)
    }

    pub fn original_bytes(&self, id: &str) -> Option<&[u8]> {
        self.entries.get(id).map(|entry| entry.bytes.as_slice())
    }

    pub fn metadata(&self, id: &str) -> Option<&DocumentMetadata> {
        self.entries.get(id).map(|entry| &entry.metadata)
    }

    /// Release one document. Returns the entry if it existed.
    pub fn remove(&mut self, id: &str) -> Option<StoredOriginal> {
        self.entries.remove(id)
    }

    /// Release every stored document.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

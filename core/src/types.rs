//! Core types for the ragprep crates.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Key/value metadata attached to documents and chunks.
///
/// Keys are kept sorted so serialized output is deterministic.
pub type Metadata = BTreeMap<String, Value>;

/// Metadata key holding the document's source identifier.
pub const SOURCE_ID: &str = "source_id";

/// Metadata key holding a chunk's position within its document.
pub const CHUNK_INDEX: &str = "chunk_index";

/// Source identifier used when a document carries none.
pub const DEFAULT_SOURCE_ID: &str = "doc";

/// A loaded document waiting to be chunked.
///
/// Loaders produce one per file (or one per row for row-oriented formats).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Plain text content.
    pub text: String,
    /// Source metadata, inherited by every chunk.
    pub metadata: Metadata,
}

impl Document {
    /// Creates a new document with empty metadata.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: Metadata::new(),
        }
    }

    /// Creates a new document with metadata.
    #[must_use]
    pub fn with_metadata(text: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }

    /// Returns the `source_id` metadata entry, or `"doc"` when absent.
    #[must_use]
    pub fn source_id(&self) -> &str {
        self.metadata
            .get(SOURCE_ID)
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_SOURCE_ID)
    }
}

/// A chunk of text derived from a document.
///
/// Serialized as `{"text": ..., "metadata": ..., "chunk_id": ...}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Text content of the chunk.
    pub text: String,
    /// Inherited and chunk-specific metadata.
    pub metadata: Metadata,
    /// Identifier, unique within one document (format: `{source_id}_chunk_{n}`).
    pub chunk_id: String,
}

impl Chunk {
    /// Creates a new chunk.
    #[must_use]
    pub fn new(text: impl Into<String>, metadata: Metadata, chunk_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata,
            chunk_id: chunk_id.into(),
        }
    }

    /// Builds the identifier for chunk `index` of `source_id`.
    #[must_use]
    pub fn derive_id(source_id: &str, index: usize) -> String {
        format!("{source_id}_chunk_{index}")
    }

    /// Returns the `chunk_index` metadata entry.
    #[must_use]
    pub fn index(&self) -> Option<u64> {
        self.metadata.get(CHUNK_INDEX).and_then(Value::as_u64)
    }
}

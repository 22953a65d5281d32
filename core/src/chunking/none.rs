//! Pass-through chunking.

use crate::error::Result;
use crate::types::{Chunk, Document};

use super::{Chunker, build_chunk};

/// Emits the whole document as a single chunk with `chunk_index` 0.
///
/// An empty document still yields one (empty) chunk, so every document
/// shows up in the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughChunker;

impl Chunker for PassthroughChunker {
    fn chunk(&self, doc: &Document) -> Result<Vec<Chunk>> {
        Ok(vec![build_chunk(doc, 0, doc.text.clone(), [])])
    }

    fn name(&self) -> &str {
        "none"
    }
}

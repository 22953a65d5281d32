//! Text chunking strategies.
//!
//! This module provides the [`Chunker`] trait and the four built-in
//! strategies for splitting documents into bounded-size chunks.

mod character;
mod none;
mod registry;
mod sentence;
mod token;

pub use character::CharacterChunker;
pub use none::PassthroughChunker;
pub use registry::{ChunkerFactory, ChunkerRegistry};
pub use sentence::SentenceChunker;
pub use token::TokenChunker;

use serde_json::Value;

use crate::error::Result;
use crate::types::{CHUNK_INDEX, Chunk, Document};

/// Trait for text chunking strategies.
///
/// Chunkers are stateless across calls: every call reads only the document
/// it is given, so one chunker may serve many threads at once.
///
/// - [`PassthroughChunker`]: the whole document as one chunk
/// - [`CharacterChunker`]: fixed character windows with overlap
/// - [`SentenceChunker`]: whole sentences packed up to a size limit
/// - [`TokenChunker`]: fixed token windows with overlap
pub trait Chunker: Send + Sync {
    /// Splits a document into chunks.
    ///
    /// Chunks are returned in order; their `chunk_index` values run
    /// `0..n` without gaps.
    ///
    /// # Errors
    /// Strategies that call out to a tokenizer surface its failures.
    fn chunk(&self, doc: &Document) -> Result<Vec<Chunk>>;

    /// Returns the name of this chunking strategy.
    fn name(&self) -> &str;
}

/// Builds chunk `index` of `doc`: document metadata, then `chunk_index`,
/// then the strategy-specific `extra` entries.
pub(crate) fn build_chunk<const N: usize>(
    doc: &Document,
    index: usize,
    text: String,
    extra: [(&str, usize); N],
) -> Chunk {
    let mut metadata = doc.metadata.clone();
    metadata.insert(CHUNK_INDEX.into(), Value::from(index));
    for (key, value) in extra {
        metadata.insert(key.into(), Value::from(value));
    }

    Chunk::new(text, metadata, Chunk::derive_id(doc.source_id(), index))
}

/// Window bounds `[start, end)` over a sequence of `len` units.
///
/// Window `i` starts at `i * (size - overlap)` and ends at
/// `min(start + size, len)`; iteration stops once a start reaches `len`.
/// Callers must have validated `overlap < size`.
pub(crate) fn windows(len: usize, size: usize, overlap: usize) -> impl Iterator<Item = (usize, usize)> {
    let stride = size - overlap;
    (0..)
        .map(move |i| i * stride)
        .take_while(move |&start| start < len)
        .map(move |start| (start, (start + size).min(len)))
}

//! Fixed-size character chunking.

use crate::config::validate_window;
use crate::error::{ConfigError, Result};
use crate::types::{Chunk, Document};

use super::{Chunker, build_chunk, windows};

/// Chunks text into fixed-size character windows with configurable overlap.
///
/// Sizes count Unicode scalar values, not bytes, so multi-byte text is never
/// cut inside a character. Window `i` covers characters
/// `[i * (size - overlap), min(i * (size - overlap) + size, len))`.
///
/// # Example
///
/// ```rust
/// use ragprep_core::{CharacterChunker, Chunker, Document};
///
/// let chunker = CharacterChunker::new(10, 2).unwrap();
/// let chunks = chunker.chunk(&Document::new("AAAA BBBB CCCC DDDD")).unwrap();
/// assert_eq!(chunks[1].text, "B CCCC DDD");
/// ```
#[derive(Debug, Clone)]
pub struct CharacterChunker {
    /// Maximum size of each chunk in characters.
    chunk_size: usize,
    /// Number of overlapping characters between consecutive chunks.
    overlap: usize,
}

impl CharacterChunker {
    /// Creates a new character chunker.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if `chunk_size` is zero or
    /// `overlap >= chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> std::result::Result<Self, ConfigError> {
        validate_window(chunk_size, overlap)?;
        Ok(Self {
            chunk_size,
            overlap,
        })
    }
}

impl Chunker for CharacterChunker {
    fn chunk(&self, doc: &Document) -> Result<Vec<Chunk>> {
        let text = &doc.text;
        // Byte offset of every character boundary, including the end.
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();
        let len = boundaries.len() - 1;

        let chunks = windows(len, self.chunk_size, self.overlap)
            .enumerate()
            .map(|(index, (start, end))| {
                let slice = &text[boundaries[start]..boundaries[end]];
                build_chunk(
                    doc,
                    index,
                    slice.to_string(),
                    [("start_char", start), ("end_char", end)],
                )
            })
            .collect();

        Ok(chunks)
    }

    fn name(&self) -> &str {
        "character"
    }
}

//! Token-window chunking.

use std::fmt;
use std::sync::Arc;

use crate::config::validate_window;
use crate::error::{ConfigError, Result};
use crate::tokenizer::Tokenizer;
use crate::types::{Chunk, Document};

use super::{Chunker, build_chunk, windows};

/// Chunks text into fixed-size token windows with configurable overlap.
///
/// The document is encoded once, windowed like [`CharacterChunker`]
/// but over token ids, and each window is decoded back into text.
///
/// [`CharacterChunker`]: super::CharacterChunker
#[derive(Clone)]
pub struct TokenChunker {
    chunk_size: usize,
    overlap: usize,
    tokenizer: Arc<dyn Tokenizer>,
}

impl fmt::Debug for TokenChunker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenChunker")
            .field("chunk_size", &self.chunk_size)
            .field("overlap", &self.overlap)
            .finish_non_exhaustive()
    }
}

impl TokenChunker {
    /// Creates a token chunker over `tokenizer`.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if `chunk_size` is zero or
    /// `overlap >= chunk_size`.
    pub fn new(
        chunk_size: usize,
        overlap: usize,
        tokenizer: Arc<dyn Tokenizer>,
    ) -> std::result::Result<Self, ConfigError> {
        validate_window(chunk_size, overlap)?;
        Ok(Self {
            chunk_size,
            overlap,
            tokenizer,
        })
    }
}

impl Chunker for TokenChunker {
    fn chunk(&self, doc: &Document) -> Result<Vec<Chunk>> {
        let tokens = self.tokenizer.encode(&doc.text)?;

        windows(tokens.len(), self.chunk_size, self.overlap)
            .enumerate()
            .map(|(index, (start, end))| {
                let text = self.tokenizer.decode(&tokens[start..end])?;
                Ok(build_chunk(
                    doc,
                    index,
                    text,
                    [("start_token", start), ("end_token", end)],
                ))
            })
            .collect()
    }

    fn name(&self) -> &str {
        "token"
    }
}

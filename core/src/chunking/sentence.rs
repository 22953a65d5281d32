//! Sentence-based text chunking.

use unicode_segmentation::UnicodeSegmentation;

use crate::config::validate_window;
use crate::error::{ConfigError, Result};
use crate::types::{Chunk, Document};

use super::{Chunker, build_chunk};

/// Chunks text by sentence boundaries.
///
/// Sentences (UAX #29 boundaries, punctuation-only and symbol-only
/// sentences included) are packed greedily, joined by a single
/// space, until the next one would push the chunk past `max_chunk_size`
/// characters. A sentence is never split: one that is too long on its own
/// becomes an oversized chunk.
///
/// Overlap carries whole sentences. Walking backwards from the end of the
/// previous chunk, sentences are carried until they add up to at least
/// `overlap` characters, then dropped from the front again while the next
/// chunk would not fit.
///
/// # Example
///
/// ```rust
/// use ragprep_core::{Chunker, Document, SentenceChunker};
///
/// let chunker = SentenceChunker::new(500, 0).unwrap();
/// let doc = Document::new("First sentence. Second sentence. Third sentence.");
/// let chunks = chunker.chunk(&doc).unwrap();
/// assert_eq!(chunks.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SentenceChunker {
    /// Maximum size of each chunk in characters.
    max_chunk_size: usize,
    /// Minimum number of characters carried into the next chunk.
    overlap: usize,
}

impl SentenceChunker {
    /// Creates a new sentence chunker.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if `max_chunk_size` is zero or
    /// `overlap >= max_chunk_size`.
    pub fn new(max_chunk_size: usize, overlap: usize) -> std::result::Result<Self, ConfigError> {
        validate_window(max_chunk_size, overlap)?;
        Ok(Self {
            max_chunk_size,
            overlap,
        })
    }
}

/// Character length of sentences `[start, end)` once joined by spaces.
struct Spans {
    prefix: Vec<usize>,
}

impl Spans {
    fn new(sentences: &[&str]) -> Self {
        let mut prefix = Vec::with_capacity(sentences.len() + 1);
        prefix.push(0);
        for sentence in sentences {
            let last = prefix[prefix.len() - 1];
            prefix.push(last + sentence.chars().count());
        }
        Self { prefix }
    }

    fn joined_len(&self, start: usize, end: usize) -> usize {
        self.prefix[end] - self.prefix[start] + (end - start).saturating_sub(1)
    }
}

impl Chunker for SentenceChunker {
    fn chunk(&self, doc: &Document) -> Result<Vec<Chunk>> {
        let text = doc.text.as_str();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let mut sentences: Vec<&str> = text
            .split_sentence_bounds()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if sentences.is_empty() {
            // No boundary found: the whole text counts as one sentence.
            tracing::debug!(source_id = doc.source_id(), "no sentence boundaries detected");
            sentences.push(text);
        }

        let spans = Spans::new(&sentences);
        let emit = |index: usize, start: usize, end: usize| {
            build_chunk(
                doc,
                index,
                sentences[start..end].join(" "),
                [("start_sentence", start), ("end_sentence", end)],
            )
        };

        let mut chunks = Vec::new();
        let mut start = 0;
        let mut end = 0;

        for next in 0..sentences.len() {
            if end > start && spans.joined_len(start, next + 1) > self.max_chunk_size {
                chunks.push(emit(chunks.len(), start, end));

                let mut carry = end;
                while carry > start && spans.joined_len(carry, end) < self.overlap {
                    carry -= 1;
                }
                while carry < end && spans.joined_len(carry, next + 1) > self.max_chunk_size {
                    carry += 1;
                }
                start = carry;
            }
            end = next + 1;
        }

        if end > start {
            chunks.push(emit(chunks.len(), start, end));
        }

        Ok(chunks)
    }

    fn name(&self) -> &str {
        "sentence"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn short_sentences_grouped_within_limit() {
        let chunker = SentenceChunker::new(100, 10).unwrap();
        let chunks = chunker.chunk(&Document::new("One. Two. Three.")).unwrap();

        assert_eq!(texts(&chunks), vec!["One. Two. Three."]);
    }

    #[test]
    fn oversized_sentence_is_kept_whole() {
        let chunker = SentenceChunker::new(20, 0).unwrap();
        let long = "Three is a much longer sentence that exceeds the limit on its own.";
        let doc = Document::new(format!("One. Two. {long}"));
        let chunks = chunker.chunk(&doc).unwrap();

        assert_eq!(texts(&chunks), vec!["One. Two.", long]);
        assert_eq!(chunks[1].metadata["start_sentence"], 2);
        assert_eq!(chunks[1].metadata["end_sentence"], 3);
    }

    #[test]
    fn multiple_chunks_have_sequential_indices() {
        let text: String = (0..50).map(|i| format!("Sentence {i}. ")).collect();
        let chunker = SentenceChunker::new(100, 20).unwrap();
        let chunks = chunker.chunk(&Document::new(text)).unwrap();

        assert!(chunks.len() > 1);
        for (i, chunk) in chunks.iter().enumerate() {
            assert!(!chunk.text.is_empty());
            assert!(chunk.text.chars().count() <= 100);
            assert_eq!(chunk.index(), Some(i as u64));
            assert_eq!(chunk.chunk_id, format!("doc_chunk_{i}"));
        }
    }

    #[test]
    fn overlap_carries_trailing_sentences() {
        let text: String = (10..40).map(|i| format!("Sentence {i}. ")).collect();
        let chunker = SentenceChunker::new(60, 12).unwrap();
        let chunks = chunker.chunk(&Document::new(text)).unwrap();

        assert!(chunks.len() > 2);
        for pair in chunks.windows(2) {
            let prev_end = pair[0].metadata["end_sentence"].as_u64().unwrap();
            let next_start = pair[1].metadata["start_sentence"].as_u64().unwrap();
            // Each sentence is 12 characters, so exactly one is carried.
            assert_eq!(next_start, prev_end - 1);

            let carried = pair[0].text.rsplit(". ").next().unwrap();
            assert!(pair[1].text.starts_with(carried));
        }
    }

    #[test]
    fn every_sentence_appears_whole() {
        let sentences: Vec<String> = (0..30)
            .map(|i| format!("Number {i} says {}.", "la ".repeat(i % 7).trim_end()))
            .collect();
        let text = sentences.join(" ");
        let chunker = SentenceChunker::new(45, 10).unwrap();
        let chunks = chunker.chunk(&Document::new(text)).unwrap();

        for sentence in &sentences {
            assert!(
                chunks.iter().any(|c| c.text.contains(sentence.as_str())),
                "missing sentence: {sentence}"
            );
        }
    }

    #[test]
    fn sentences_without_letters_are_kept() {
        let chunker = SentenceChunker::new(1000, 0).unwrap();
        let chunks = chunker
            .chunk(&Document::new("Hello there. 🎉🎉🎉! ?! Goodbye now. … Done."))
            .unwrap();

        assert_eq!(chunks.len(), 1);
        for piece in ["Hello there.", "🎉🎉🎉!", "?!", "Goodbye now.", "…", "Done."] {
            assert!(chunks[0].text.contains(piece), "missing: {piece}");
        }
    }

    #[test]
    fn symbol_sentence_in_the_middle_gets_its_own_slot() {
        let chunker = SentenceChunker::new(12, 0).unwrap();
        let chunks = chunker
            .chunk(&Document::new("Hello there. 🎉🎉🎉! Goodbye now."))
            .unwrap();

        assert_eq!(texts(&chunks), vec!["Hello there.", "🎉🎉🎉!", "Goodbye now."]);
        assert_eq!(chunks[1].metadata["start_sentence"], 1);
        assert_eq!(chunks[1].metadata["end_sentence"], 2);
    }

    #[test]
    fn text_without_boundaries_is_one_sentence() {
        let chunker = SentenceChunker::new(5, 0).unwrap();
        let chunks = chunker.chunk(&Document::new("no terminal punctuation here")).unwrap();

        assert_eq!(texts(&chunks), vec!["no terminal punctuation here"]);
    }

    #[test]
    fn whitespace_only_text_is_kept() {
        let chunker = SentenceChunker::new(5, 0).unwrap();
        let chunks = chunker.chunk(&Document::new("   ")).unwrap();

        assert_eq!(texts(&chunks), vec!["   "]);
    }

    #[test]
    fn rejects_invalid_window() {
        assert_eq!(
            SentenceChunker::new(0, 0).unwrap_err(),
            ConfigError::InvalidChunkSize
        );
        assert_eq!(
            SentenceChunker::new(10, 10).unwrap_err(),
            ConfigError::OverlapTooLarge { overlap: 10, size: 10 }
        );
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let chunker = SentenceChunker::new(5, 0).unwrap();
        assert!(chunker.chunk(&Document::new("")).unwrap().is_empty());
    }
}

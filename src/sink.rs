//! Chunk sinks.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ragprep_core::{Chunk, PrepError, Result};

/// Receives chunks as the pipeline produces them.
pub trait Sink {
    /// Consumes one chunk.
    ///
    /// # Errors
    /// Returns an error if the chunk cannot be stored.
    fn write(&mut self, chunk: &Chunk) -> Result<()>;

    /// Called once after the last chunk.
    ///
    /// # Errors
    /// Returns an error if buffered output cannot be flushed.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes chunks as JSON Lines: one `{"text","metadata","chunk_id"}` object
/// per line, UTF-8, non-ASCII left unescaped.
#[derive(Debug)]
pub struct JsonlSink<W: Write> {
    writer: W,
    line: Vec<u8>,
    written: usize,
}

impl JsonlSink<BufWriter<File>> {
    /// Create (or truncate) `path` and write to it through a buffer.
    ///
    /// # Errors
    /// Returns [`PrepError::Io`] if the file cannot be created.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path.as_ref())?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonlSink<W> {
    /// Wrap an existing writer.
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            line: Vec::new(),
            written: 0,
        }
    }

    /// Number of lines written so far.
    #[must_use]
    pub const fn written(&self) -> usize {
        self.written
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for JsonlSink<W> {
    fn write(&mut self, chunk: &Chunk) -> Result<()> {
        // The record is fully serialized before any byte reaches the writer.
        self.line.clear();
        serde_json::to_writer(&mut self.line, chunk)?;
        self.line.push(b'\n');
        self.writer.write_all(&self.line)?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().map_err(PrepError::from)
    }
}

/// Collects chunks in memory.
#[derive(Debug, Clone, Default)]
pub struct VecSink {
    chunks: Vec<Chunk>,
}

impl VecSink {
    /// Create an empty sink.
    #[must_use]
    pub const fn new() -> Self {
        Self { chunks: Vec::new() }
    }

    /// Chunks collected so far.
    #[must_use]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Consumes the sink, returning the collected chunks.
    #[must_use]
    pub fn into_chunks(self) -> Vec<Chunk> {
        self.chunks
    }
}

impl Sink for VecSink {
    fn write(&mut self, chunk: &Chunk) -> Result<()> {
        self.chunks.push(chunk.clone());
        Ok(())
    }
}

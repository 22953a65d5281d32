//! # ragprep-core
//!
//! Chunking engine behind [`ragprep`](https://crates.io/crates/ragprep).
//!
//! A [`Document`] goes in, an ordered list of [`Chunk`]s comes out. Each
//! chunk carries the document's metadata plus its `chunk_index` and a
//! `chunk_id` of the form `{source_id}_chunk_{index}`.
//!
//! | Strategy | Chunker | Size unit |
//! |----------|---------|-----------|
//! | `none` | [`PassthroughChunker`] | whole document |
//! | `character` | [`CharacterChunker`] | characters |
//! | `sentence` | [`SentenceChunker`] | characters, whole sentences |
//! | `token` | [`TokenChunker`] | tokenizer tokens |
//!
//! ## Quick Start
//!
//! ```rust
//! use ragprep_core::{Chunker, ChunkerRegistry, Config, Document};
//!
//! let config = Config::builder()
//!     .chunk_strategy("character")
//!     .chunk_size(10)
//!     .chunk_overlap(2)
//!     .build()
//!     .unwrap();
//! let chunker = ChunkerRegistry::new().resolve(&config, None).unwrap();
//!
//! let chunks = chunker.chunk(&Document::new("AAAA BBBB CCCC DDDD")).unwrap();
//! assert_eq!(chunks.len(), 3);
//! assert_eq!(chunks[0].chunk_id, "doc_chunk_0");
//! ```

mod chunking;
mod config;
mod error;
mod tokenizer;
mod types;

pub use chunking::{
    CharacterChunker, Chunker, ChunkerFactory, ChunkerRegistry, PassthroughChunker,
    SentenceChunker, TokenChunker,
};
pub use config::{ChunkStrategy, Config, ConfigBuilder, DEFAULT_TOKENIZER};
pub use error::{ConfigError, PrepError, Result};
pub use tokenizer::{TiktokenTokenizer, Tokenizer};
pub use types::{CHUNK_INDEX, Chunk, DEFAULT_SOURCE_ID, Document, Metadata, SOURCE_ID};

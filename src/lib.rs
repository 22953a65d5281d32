//! # ragprep
//!
//! Turn files into retrieval-ready chunks.
//!
//! `ragprep` loads documents (plain text, Markdown, HTML, CSV, PDF, DOCX),
//! optionally normalizes their whitespace, splits them with one of the
//! chunking strategies from [`ragprep_core`], enriches each chunk's metadata
//! through hooks, and streams the result to a [`Sink`], typically a JSON
//! Lines file.
//!
//! ```text
//! path ──▶ LoaderRegistry ──▶ Cleaner ──▶ Chunker ──▶ MetadataHook* ──▶ Sink
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ragprep::{Config, ContentHash, JsonlSink, Pipeline};
//!
//! fn main() -> ragprep::Result<()> {
//!     let config = Config::builder()
//!         .chunk_strategy("sentence")
//!         .chunk_size(800)
//!         .chunk_overlap(100)
//!         .build()?;
//!
//!     let pipeline = Pipeline::builder()
//!         .config(config)
//!         .include(["*.md", "*.txt"])
//!         .exclude(["*draft*"])
//!         .hook(ContentHash)
//!         .build()?;
//!
//!     let mut sink = JsonlSink::create("chunks.jsonl")?;
//!     let summary = pipeline.run("docs/", &mut sink)?;
//!     println!("{} chunks from {} documents", summary.chunks, summary.documents);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature flags
//!
//! - `pdf` (default): PDF loading through `ragprep-pdf`.
//! - `docx` (default): Word document loading through `docx-rs`.

mod cleaning;
pub mod hooks;
pub mod loaders;
mod pipeline;
mod sink;

pub use cleaning::{BasicCleaner, Cleaner};
pub use hooks::{ContentHash, MetadataHook};
pub use loaders::{Loader, LoaderRegistry};
pub use pipeline::{Pipeline, PipelineBuilder, RunSummary, prepare_docs, prepare_docs_to_jsonl};
pub use sink::{JsonlSink, Sink, VecSink};

pub use ragprep_core::*;

//! Command-line front end for ragprep.
//!
//! Reads a file or directory, chunks every document and writes one JSON
//! object per chunk to the output file.
//!
//! # Usage
//!
//! ```bash
//! # Character windows with the defaults (1000 characters, 200 overlap)
//! ragprep docs/ -o chunks.jsonl
//!
//! # Sentence packing over Markdown only, skipping drafts
//! ragprep docs/ -o chunks.jsonl --chunk-strategy sentence --chunk-size 800 \
//!     --chunk-overlap 100 --include '*.md' --exclude '*draft*'
//!
//! # Token windows with a different encoding
//! ragprep report.pdf -o chunks.jsonl --chunk-strategy token --chunk-size 256 \
//!     --chunk-overlap 32 --tokenizer o200k_base
//! ```
//!
//! Logging goes to stderr. `RUST_LOG` takes precedence; otherwise `-v`
//! enables debug output and the default level is `warn`.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use ragprep::{ChunkStrategy, Config, ContentHash, JsonlSink, Pipeline};
use tracing_subscriber::EnvFilter;

/// Prepare documents for RAG/LLM workflows.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Input file or directory.
    input: PathBuf,

    /// Output JSONL file path.
    #[arg(short, long)]
    output: PathBuf,

    /// Chunking strategy: none, character, sentence or token.
    #[arg(long, default_value = "character")]
    chunk_strategy: ChunkStrategy,

    /// Maximum chunk size (characters, or tokens for the token strategy).
    #[arg(long, default_value_t = 1000)]
    chunk_size: usize,

    /// Overlap between consecutive chunks.
    #[arg(long, default_value_t = 200)]
    chunk_overlap: usize,

    /// Tokenizer for the token strategy, or `none` to disable.
    #[arg(long, default_value = ragprep::DEFAULT_TOKENIZER)]
    tokenizer: String,

    /// Only load files matching these globs (directory input).
    #[arg(long, num_args = 1..)]
    include: Vec<String>,

    /// Skip files matching these globs (directory input).
    #[arg(long, num_args = 1..)]
    exclude: Vec<String>,

    /// Normalize whitespace before chunking.
    #[arg(long)]
    normalize: bool,

    /// Add an xxh3 `content_hash` to every chunk's metadata.
    #[arg(long)]
    content_hash: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> Config {
        let tokenizer_name = if self.tokenizer.eq_ignore_ascii_case("none") {
            None
        } else {
            Some(self.tokenizer.clone())
        };

        Config {
            chunk_strategy: self.chunk_strategy.clone(),
            chunk_size: self.chunk_size,
            chunk_overlap: self.chunk_overlap,
            tokenizer_name,
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let config = args.config();
    tracing::info!(
        input = %args.input.display(),
        output = %args.output.display(),
        strategy = %config.chunk_strategy,
        chunk_size = config.chunk_size,
        chunk_overlap = config.chunk_overlap,
        tokenizer = config.tokenizer_name.as_deref().unwrap_or("none"),
        "starting"
    );

    let mut builder = Pipeline::builder()
        .config(config)
        .include(args.include.iter().cloned())
        .exclude(args.exclude.iter().cloned())
        .normalize(args.normalize);
    if args.content_hash {
        builder = builder.hook(ContentHash);
    }
    let pipeline = builder.build().context("invalid configuration")?;

    let mut sink = JsonlSink::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    let summary = pipeline
        .run(&args.input, &mut sink)
        .with_context(|| format!("failed to process {}", args.input.display()))?;

    for skipped in &summary.skipped {
        tracing::warn!(source = %skipped, "skipped");
    }
    tracing::info!(
        documents = summary.documents,
        chunks = summary.chunks,
        output = %args.output.display(),
        "wrote chunks"
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

//! Load, normalize, chunk, enrich, emit.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use ragprep_core::{
    Chunk, Chunker, ChunkerRegistry, Config, Document, Metadata, PrepError, Result, SOURCE_ID,
    Tokenizer,
};
use serde_json::Value;

use crate::cleaning::{BasicCleaner, Cleaner};
use crate::hooks::{MetadataHook, enrich};
use crate::loaders::{Loader, LoaderRegistry, PathFilter, TextLoader, walk_files};
use crate::sink::{JsonlSink, Sink, VecSink};

/// Counts reported by [`Pipeline::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Documents chunked and emitted.
    pub documents: usize,
    /// Chunks written to the sink.
    pub chunks: usize,
    /// Files or documents that were skipped, by path or `source_id`.
    pub skipped: Vec<String>,
}

/// A configured document preparation pipeline.
///
/// Each document flows through the optional cleaner, the chunker and the
/// metadata hooks before its chunks reach the sink. Documents are
/// processed one at a time, in load order.
///
/// # Example
///
/// ```rust
/// use ragprep::{Config, Pipeline};
///
/// let config = Config::builder()
///     .chunk_strategy("character")
///     .chunk_size(10)
///     .chunk_overlap(2)
///     .build()
///     .unwrap();
/// let pipeline = Pipeline::builder().config(config).build().unwrap();
///
/// let chunks = pipeline.prepare_text("AAAA BBBB CCCC DDDD", "demo").unwrap();
/// assert_eq!(chunks.len(), 3);
/// assert_eq!(chunks[2].chunk_id, "demo_chunk_2");
/// ```
pub struct Pipeline {
    chunker: Box<dyn Chunker>,
    loaders: LoaderRegistry,
    filter: PathFilter,
    hooks: Vec<Box<dyn MetadataHook>>,
    cleaner: Option<Box<dyn Cleaner>>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("chunker", &self.chunker.name())
            .field("loaders", &self.loaders)
            .field("filter", &self.filter)
            .field("hooks", &self.hooks.len())
            .field("cleaner", &self.cleaner.as_ref().map(|c| c.name()))
            .finish()
    }
}

impl Pipeline {
    /// Start configuring a pipeline.
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Name of the chunking strategy in use.
    #[must_use]
    pub fn strategy(&self) -> &str {
        self.chunker.name()
    }

    /// Chunk a file or directory and collect the chunks.
    ///
    /// # Errors
    /// See [`Pipeline::run`].
    pub fn prepare(&self, path: impl AsRef<Path>) -> Result<Vec<Chunk>> {
        let mut sink = VecSink::new();
        self.run(path, &mut sink)?;
        Ok(sink.into_chunks())
    }

    /// Chunk an in-memory text.
    ///
    /// The document's metadata is `source_id` plus `source_type: "string"`.
    ///
    /// # Errors
    /// Returns the chunker's error, including [`PrepError::Encoding`].
    pub fn prepare_text(&self, text: &str, source_id: &str) -> Result<Vec<Chunk>> {
        let mut metadata = Metadata::new();
        metadata.insert(SOURCE_ID.into(), Value::from(source_id));
        metadata.insert("source_type".into(), Value::from("string"));
        self.chunk_document(&Document::with_metadata(text, metadata))
    }

    /// Clean, chunk and enrich one document.
    ///
    /// # Errors
    /// Returns the chunker's error.
    pub fn chunk_document(&self, doc: &Document) -> Result<Vec<Chunk>> {
        let cleaned;
        let doc = match &self.cleaner {
            Some(cleaner) => {
                cleaned = cleaner.clean(doc);
                &cleaned
            }
            None => doc,
        };

        let chunks = self.chunker.chunk(doc)?;
        tracing::debug!(
            source_id = doc.source_id(),
            chunks = chunks.len(),
            strategy = self.chunker.name(),
            "chunked document"
        );

        Ok(chunks
            .into_iter()
            .map(|chunk| enrich(chunk, &self.hooks))
            .collect())
    }

    /// Stream the chunks of a file or directory into `sink`.
    ///
    /// A directory is walked recursively; files without a registered loader
    /// are ignored, and files that fail to load are logged and listed in
    /// [`RunSummary::skipped`]. A single file with an unknown extension is
    /// read as plain text. Documents whose text the tokenizer rejects are
    /// skipped the same way.
    ///
    /// # Errors
    /// Returns [`PrepError::Load`] if `path` does not exist or a single-file
    /// input cannot be loaded, [`PrepError::Unsupported`] if `path` is
    /// neither a regular file nor a directory, and any sink error.
    pub fn run(&self, path: impl AsRef<Path>, sink: &mut dyn Sink) -> Result<RunSummary> {
        let path = path.as_ref();
        let mut summary = RunSummary::default();

        if path.is_dir() {
            for file in walk_files(path, &self.filter) {
                let Some(loader) = self.loaders.for_path(&file) else {
                    tracing::debug!(path = %file.display(), "no loader for file, ignoring");
                    continue;
                };
                match loader.load(&file) {
                    Ok(docs) => self.emit(docs, sink, &mut summary)?,
                    Err(e) => {
                        tracing::warn!(path = %file.display(), error = %e, "failed to load file, skipping");
                        summary.skipped.push(file.display().to_string());
                    }
                }
            }
        } else if path.is_file() {
            let loader: &dyn Loader = self.loaders.for_path(path).unwrap_or(&TextLoader);
            let docs = loader.load(path)?;
            self.emit(docs, sink, &mut summary)?;
        } else if path.exists() {
            return Err(PrepError::Unsupported(path.to_path_buf()));
        } else {
            return Err(PrepError::load(path, "no such file or directory"));
        }

        sink.finish()?;
        tracing::info!(
            documents = summary.documents,
            chunks = summary.chunks,
            skipped = summary.skipped.len(),
            "preparation finished"
        );
        Ok(summary)
    }

    fn emit(&self, docs: Vec<Document>, sink: &mut dyn Sink, summary: &mut RunSummary) -> Result<()> {
        for doc in docs {
            match self.chunk_document(&doc) {
                Ok(chunks) => {
                    for chunk in &chunks {
                        sink.write(chunk)?;
                    }
                    summary.documents += 1;
                    summary.chunks += chunks.len();
                }
                Err(PrepError::Encoding(reason)) => {
                    tracing::warn!(source_id = doc.source_id(), %reason, "tokenizer rejected document, skipping");
                    summary.skipped.push(doc.source_id().to_string());
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

/// Builder for [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    config: Config,
    chunker: Option<Box<dyn Chunker>>,
    tokenizer: Option<Arc<dyn Tokenizer>>,
    strategies: ChunkerRegistry,
    loaders: LoaderRegistry,
    include: Vec<String>,
    exclude: Vec<String>,
    hooks: Vec<Box<dyn MetadataHook>>,
    cleaner: Option<Box<dyn Cleaner>>,
}

impl fmt::Debug for PipelineBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("config", &self.config)
            .field("strategies", &self.strategies)
            .field("include", &self.include)
            .field("exclude", &self.exclude)
            .field("hooks", &self.hooks.len())
            .finish_non_exhaustive()
    }
}

impl PipelineBuilder {
    /// Use `config` for chunking.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Use `chunker` instead of resolving one from the configuration.
    #[must_use]
    pub fn chunker(mut self, chunker: impl Chunker + 'static) -> Self {
        self.chunker = Some(Box::new(chunker));
        self
    }

    /// Tokenizer for the token strategy, overriding `tokenizer_name`.
    #[must_use]
    pub fn tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    /// Make a custom chunking strategy selectable by name.
    #[must_use]
    pub fn strategy<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&Config) -> Result<Box<dyn Chunker>> + Send + Sync + 'static,
    {
        self.strategies.register(name, factory);
        self
    }

    /// Register a loader for a file extension.
    #[must_use]
    pub fn loader(mut self, extension: &str, loader: impl Loader + 'static) -> Self {
        self.loaders.register(extension, loader);
        self
    }

    /// Replace the whole loader registry.
    #[must_use]
    pub fn loaders(mut self, loaders: LoaderRegistry) -> Self {
        self.loaders = loaders;
        self
    }

    /// Only load directory entries matching one of these globs.
    #[must_use]
    pub fn include<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Skip directory entries matching any of these globs.
    #[must_use]
    pub fn exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Append a metadata hook.
    #[must_use]
    pub fn hook(mut self, hook: impl MetadataHook + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Normalize whitespace with [`BasicCleaner`] before chunking.
    #[must_use]
    pub fn normalize(mut self, enabled: bool) -> Self {
        self.cleaner = if enabled {
            Some(Box::new(BasicCleaner))
        } else {
            None
        };
        self
    }

    /// Clean documents with `cleaner` before chunking.
    #[must_use]
    pub fn cleaner(mut self, cleaner: impl Cleaner + 'static) -> Self {
        self.cleaner = Some(Box::new(cleaner));
        self
    }

    /// Validate the configuration and resolve the chunker.
    ///
    /// # Errors
    /// Returns [`PrepError::Config`] for an invalid window, unknown strategy,
    /// unavailable tokenizer or malformed glob.
    pub fn build(self) -> Result<Pipeline> {
        let chunker = match self.chunker {
            Some(chunker) => chunker,
            None => self.strategies.resolve(&self.config, self.tokenizer)?,
        };
        let filter = PathFilter::new(&self.include, &self.exclude)?;

        Ok(Pipeline {
            chunker,
            loaders: self.loaders,
            filter,
            hooks: self.hooks,
            cleaner: self.cleaner,
        })
    }
}

/// Chunk a file or directory with `config` and collect the chunks.
///
/// # Errors
/// See [`PipelineBuilder::build`] and [`Pipeline::run`].
pub fn prepare_docs(path: impl AsRef<Path>, config: &Config) -> Result<Vec<Chunk>> {
    Pipeline::builder()
        .config(config.clone())
        .build()?
        .prepare(path)
}

/// Chunk a file or directory with `config` and write JSON Lines to `output`.
///
/// The configuration is checked before `output` is created.
///
/// # Errors
/// See [`PipelineBuilder::build`] and [`Pipeline::run`].
pub fn prepare_docs_to_jsonl(
    path: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &Config,
) -> Result<RunSummary> {
    let pipeline = Pipeline::builder().config(config.clone()).build()?;
    let mut sink = JsonlSink::create(output)?;
    pipeline.run(path, &mut sink)
}

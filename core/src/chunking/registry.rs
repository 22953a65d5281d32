//! Name-based chunker resolution.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::{ChunkStrategy, Config};
use crate::error::{ConfigError, Result};
use crate::tokenizer::{TiktokenTokenizer, Tokenizer};

use super::{CharacterChunker, Chunker, PassthroughChunker, SentenceChunker, TokenChunker};

/// Builds a chunker for a custom strategy from the run configuration.
pub type ChunkerFactory = Box<dyn Fn(&Config) -> Result<Box<dyn Chunker>> + Send + Sync>;

/// Maps strategy identifiers to chunkers.
///
/// The four built-in strategies are always available. Additional strategies
/// are registered by name and selected with [`ChunkStrategy::Custom`].
///
/// # Example
///
/// ```rust
/// use ragprep_core::{Chunker, ChunkerRegistry, Config, PassthroughChunker};
///
/// let mut registry = ChunkerRegistry::new();
/// registry.register("whole", |_: &Config| Ok(Box::new(PassthroughChunker) as Box<dyn Chunker>));
///
/// let config = Config::builder().chunk_strategy("whole").build().unwrap();
/// let chunker = registry.resolve(&config, None).unwrap();
/// assert_eq!(chunker.name(), "none");
/// ```
#[derive(Default)]
pub struct ChunkerRegistry {
    custom: HashMap<String, ChunkerFactory>,
}

impl fmt::Debug for ChunkerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkerRegistry")
            .field("custom", &self.custom.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ChunkerRegistry {
    /// Create a registry holding only the built-in strategies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom strategy. Names are case-insensitive; registering
    /// the same name twice replaces the earlier factory.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&Config) -> Result<Box<dyn Chunker>> + Send + Sync + 'static,
    {
        let name = name.into().trim().to_lowercase();
        tracing::debug!(strategy = %name, "registered chunking strategy");
        self.custom.insert(name, Box::new(factory));
    }

    /// Check if a custom strategy is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.custom.contains_key(&name.trim().to_lowercase())
    }

    /// All strategy names, built-in first, then custom names sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut custom: Vec<&str> = self.custom.keys().map(String::as_str).collect();
        custom.sort_unstable();

        let mut names = vec!["none", "character", "sentence", "token"];
        names.extend(custom);
        names
    }

    /// Build the chunker selected by `config`.
    ///
    /// The configuration is validated first. The token strategy uses
    /// `tokenizer` when given and otherwise loads `config.tokenizer_name`.
    ///
    /// # Errors
    /// Returns a configuration error for an invalid window, an unknown
    /// strategy, or a tokenizer that is missing or cannot be loaded. Errors
    /// from a custom factory are passed through.
    pub fn resolve(
        &self,
        config: &Config,
        tokenizer: Option<Arc<dyn Tokenizer>>,
    ) -> Result<Box<dyn Chunker>> {
        config.validate()?;
        let size = config.chunk_size;
        let overlap = config.chunk_overlap;

        let chunker: Box<dyn Chunker> = match &config.chunk_strategy {
            ChunkStrategy::None => Box::new(PassthroughChunker),
            ChunkStrategy::Character => Box::new(CharacterChunker::new(size, overlap)?),
            ChunkStrategy::Sentence => Box::new(SentenceChunker::new(size, overlap)?),
            ChunkStrategy::Token => {
                let tokenizer = match tokenizer {
                    Some(tokenizer) => tokenizer,
                    None => load_tokenizer(config.tokenizer_name.as_deref())?,
                };
                Box::new(TokenChunker::new(size, overlap, tokenizer)?)
            }
            ChunkStrategy::Custom(name) => {
                let factory = self
                    .custom
                    .get(&name.to_lowercase())
                    .ok_or_else(|| ConfigError::UnknownStrategy(name.clone()))?;
                factory(config)?
            }
        };

        tracing::debug!(
            strategy = chunker.name(),
            chunk_size = size,
            chunk_overlap = overlap,
            "resolved chunker"
        );
        Ok(chunker)
    }
}

fn load_tokenizer(name: Option<&str>) -> std::result::Result<Arc<dyn Tokenizer>, ConfigError> {
    let name = name.ok_or(ConfigError::MissingTokenizer)?;
    if name.trim().is_empty() {
        return Err(ConfigError::MissingTokenizer);
    }
    Ok(Arc::new(TiktokenTokenizer::from_name(name.trim())?))
}

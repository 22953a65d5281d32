//! Configuration for chunking.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tokenizer used by the token strategy unless configured otherwise.
pub const DEFAULT_TOKENIZER: &str = "cl100k_base";

/// Selects how documents are split into chunks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChunkStrategy {
    /// The whole document becomes a single chunk.
    None,
    /// Fixed windows of characters.
    #[default]
    Character,
    /// Whole sentences packed up to the size limit.
    Sentence,
    /// Fixed windows of tokenizer tokens.
    Token,
    /// A strategy registered by name in a [`ChunkerRegistry`](crate::ChunkerRegistry).
    Custom(String),
}

impl ChunkStrategy {
    /// Returns the identifier of this strategy.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Character => "character",
            Self::Sentence => "sentence",
            Self::Token => "token",
            Self::Custom(name) => name,
        }
    }
}

impl FromStr for ChunkStrategy {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "none" => Self::None,
            "character" => Self::Character,
            "sentence" => Self::Sentence,
            "token" => Self::Token,
            _ => Self::Custom(s.trim().to_string()),
        })
    }
}

impl From<String> for ChunkStrategy {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(strategy) => strategy,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for ChunkStrategy {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<ChunkStrategy> for String {
    fn from(value: ChunkStrategy) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ChunkStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chunking configuration.
///
/// Sizes are measured in characters for the character and sentence
/// strategies and in tokens for the token strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which chunking strategy to use.
    pub chunk_strategy: ChunkStrategy,
    /// Maximum size of a chunk.
    pub chunk_size: usize,
    /// Trailing characters/tokens repeated at the start of the next chunk.
    pub chunk_overlap: usize,
    /// Tokenizer backend for the token strategy.
    pub tokenizer_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_strategy: ChunkStrategy::Character,
            chunk_size: 1000,
            chunk_overlap: 200,
            tokenizer_name: Some(DEFAULT_TOKENIZER.to_string()),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for custom configuration.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks the size/overlap relationship.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidChunkSize`] for a zero `chunk_size` and
    /// [`ConfigError::OverlapTooLarge`] when `chunk_overlap >= chunk_size`.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        validate_window(self.chunk_size, self.chunk_overlap)
    }

    /// Distance between the starts of consecutive windows.
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.chunk_size.saturating_sub(self.chunk_overlap)
    }
}

pub(crate) const fn validate_window(size: usize, overlap: usize) -> Result<(), ConfigError> {
    if size == 0 {
        return Err(ConfigError::InvalidChunkSize);
    }
    if overlap >= size {
        return Err(ConfigError::OverlapTooLarge { overlap, size });
    }
    Ok(())
}

/// Builder for chunking configuration.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new configuration builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Sets the chunking strategy.
    #[must_use]
    pub fn chunk_strategy(mut self, strategy: impl Into<ChunkStrategy>) -> Self {
        self.config.chunk_strategy = strategy.into();
        self
    }

    /// Sets the maximum chunk size.
    #[must_use]
    pub const fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Sets the overlap between consecutive chunks.
    #[must_use]
    pub const fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Sets the tokenizer backend name; `None` disables the default.
    #[must_use]
    pub fn tokenizer_name(mut self, name: Option<impl Into<String>>) -> Self {
        self.config.tokenizer_name = name.map(Into::into);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// See [`Config::validate`].
    pub fn build(self) -> Result<Config, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

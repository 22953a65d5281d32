//! Error types for ragprep.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid chunking configuration.
///
/// Always raised while a chunker is being constructed, never in the middle
/// of a run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `chunk_size` must be at least one.
    #[error("chunk_size must be a positive integer")]
    InvalidChunkSize,

    /// Overlap would consume the whole window.
    #[error("chunk_overlap ({overlap}) must be less than chunk_size ({size})")]
    OverlapTooLarge {
        /// Configured overlap.
        overlap: usize,
        /// Configured chunk size.
        size: usize,
    },

    /// Strategy identifier is neither built in nor registered.
    #[error(
        "unknown chunking strategy '{0}' (supported: none, character, sentence, token, or a registered name)"
    )]
    UnknownStrategy(String),

    /// The token strategy was selected without any tokenizer.
    #[error("the token strategy requires a tokenizer; set tokenizer_name or supply one")]
    MissingTokenizer,

    /// The named tokenizer backend could not be loaded.
    #[error("failed to load tokenizer '{name}': {reason}")]
    UnknownTokenizer {
        /// Requested tokenizer name.
        name: String,
        /// Backend error message.
        reason: String,
    },

    /// An include/exclude glob does not parse.
    #[error("invalid file pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Parser error message.
        reason: String,
    },
}

/// Errors that can occur while preparing documents.
#[derive(Debug, Error)]
pub enum PrepError {
    /// Configuration rejected before any document was processed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The tokenizer failed to encode or decode a document.
    #[error("tokenizer failed: {0}")]
    Encoding(String),

    /// A loader could not extract text from a file.
    #[error("failed to load {path}: {reason}")]
    Load {
        /// File that failed.
        path: PathBuf,
        /// Loader error message.
        reason: String,
    },

    /// The input is neither a regular file nor a directory.
    #[error("unsupported input (not a file or directory): {0}")]
    Unsupported(PathBuf),

    /// IO operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Chunk serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PrepError {
    /// Creates a load error for `path`.
    pub fn load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Load {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns `true` for errors that invalidate the whole run.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Result type alias for ragprep operations.
pub type Result<T> = std::result::Result<T, PrepError>;

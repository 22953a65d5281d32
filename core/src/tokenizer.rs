//! Tokenizer adapter used by the token strategy.

use core::fmt;

use tiktoken_rs::CoreBPE;

use crate::error::{ConfigError, PrepError, Result};

/// Converts text to and from model-specific token ids.
pub trait Tokenizer: Send + Sync {
    /// Encodes `text` into token ids.
    ///
    /// # Errors
    /// Returns [`PrepError::Encoding`] when the text cannot be tokenized.
    fn encode(&self, text: &str) -> Result<Vec<u32>>;

    /// Decodes token ids back into text.
    ///
    /// # Errors
    /// Returns [`PrepError::Encoding`] when the ids do not form valid text.
    fn decode(&self, tokens: &[u32]) -> Result<String>;
}

/// BPE tokenizer backed by `tiktoken-rs`.
///
/// The BPE tables ship with the crate, so loading never touches the network.
pub struct TiktokenTokenizer {
    name: String,
    bpe: CoreBPE,
}

impl fmt::Debug for TiktokenTokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TiktokenTokenizer")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl TiktokenTokenizer {
    /// Loads a tokenizer by encoding name (`cl100k_base`, `o200k_base`,
    /// `p50k_base`, `p50k_edit`, `r50k_base`/`gpt2`) or by model name
    /// (for example `gpt-4`).
    ///
    /// # Errors
    /// Returns [`ConfigError::UnknownTokenizer`] if neither lookup succeeds.
    pub fn from_name(name: &str) -> std::result::Result<Self, ConfigError> {
        let loaded = match name {
            "cl100k_base" => tiktoken_rs::cl100k_base(),
            "o200k_base" => tiktoken_rs::o200k_base(),
            "p50k_base" => tiktoken_rs::p50k_base(),
            "p50k_edit" => tiktoken_rs::p50k_edit(),
            "r50k_base" | "gpt2" => tiktoken_rs::r50k_base(),
            model => tiktoken_rs::get_bpe_from_model(model),
        };

        let bpe = loaded.map_err(|e| ConfigError::UnknownTokenizer {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!(tokenizer = name, "loaded tiktoken tokenizer");

        Ok(Self {
            name: name.to_string(),
            bpe,
        })
    }

    /// Returns the name this tokenizer was loaded with.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Tokenizer for TiktokenTokenizer {
    /// Encodes `text` as ordinary text.
    ///
    /// Text containing a special-token literal such as `<|endoftext|>` is
    /// rejected instead of being turned into a control token.
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let tokens = self.bpe.encode_ordinary(text);
        if text.contains("<|") && self.bpe.encode_with_special_tokens(text) != tokens {
            return Err(PrepError::Encoding(format!(
                "text contains a special token literal not allowed by '{}'",
                self.name
            )));
        }
        Ok(tokens.into_iter().map(|token| token as u32).collect())
    }

    fn decode(&self, tokens: &[u32]) -> Result<String> {
        self.bpe
            .decode(tokens.iter().map(|&token| token as _).collect())
            .map_err(|e| PrepError::Encoding(e.to_string()))
    }
}

//! Metadata enrichment hooks.
//!
//! Hooks run on every chunk after chunking, in registration order. Each
//! hook sees the chunk's current metadata and text and returns entries to
//! merge over that metadata; later hooks see earlier hooks' output.
//!
//! `chunk_index` and `source_id` are protected: `chunk_id` is derived from
//! them, so hook entries under those keys are dropped.

use ragprep_core::{CHUNK_INDEX, Chunk, Metadata, SOURCE_ID};
use serde_json::Value;
use xxhash_rust::xxh3::xxh3_64;

/// Computes extra metadata for a chunk.
pub trait MetadataHook: Send + Sync {
    /// Returns entries to merge into the chunk's metadata.
    fn apply(&self, metadata: &Metadata, text: &str) -> Metadata;
}

impl<F> MetadataHook for F
where
    F: Fn(&Metadata, &str) -> Metadata + Send + Sync,
{
    fn apply(&self, metadata: &Metadata, text: &str) -> Metadata {
        self(metadata, text)
    }
}

/// Adds `content_hash`: the xxh3-64 hash of the chunk text as 16 lowercase
/// hex digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentHash;

/// Metadata key written by [`ContentHash`].
pub const CONTENT_HASH: &str = "content_hash";

impl ContentHash {
    /// Hash of `text` in the format stored under [`CONTENT_HASH`].
    #[must_use]
    pub fn of(text: &str) -> String {
        format!("{:016x}", xxh3_64(text.as_bytes()))
    }
}

impl MetadataHook for ContentHash {
    fn apply(&self, _metadata: &Metadata, text: &str) -> Metadata {
        let mut extra = Metadata::new();
        extra.insert(CONTENT_HASH.into(), Value::from(Self::of(text)));
        extra
    }
}

/// Keys a hook may not overwrite.
pub const PROTECTED_KEYS: [&str; 2] = [CHUNK_INDEX, SOURCE_ID];

/// Runs `hooks` over `chunk` in order.
pub(crate) fn enrich(mut chunk: Chunk, hooks: &[Box<dyn MetadataHook>]) -> Chunk {
    for hook in hooks {
        let extra = hook.apply(&chunk.metadata, &chunk.text);
        for (key, value) in extra {
            if PROTECTED_KEYS.contains(&key.as_str()) {
                tracing::debug!(key = %key, chunk_id = %chunk.chunk_id, "hook tried to overwrite a protected key, ignoring");
                continue;
            }
            chunk.metadata.insert(key, value);
        }
    }
    chunk
}

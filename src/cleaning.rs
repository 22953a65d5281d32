//! Text normalization applied before chunking.

use ragprep_core::Document;

/// Rewrites a document's text before it is chunked.
pub trait Cleaner: Send + Sync {
    /// Returns the cleaned document; metadata is carried over unchanged.
    fn clean(&self, doc: &Document) -> Document;

    /// Returns the cleaner name.
    fn name(&self) -> &'static str;
}

/// Lightweight whitespace normalization:
/// - `\r\n` and `\r` become `\n`
/// - trailing whitespace is trimmed from every line
/// - runs of blank lines collapse to a single blank line
/// - leading and trailing whitespace is trimmed
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicCleaner;

impl BasicCleaner {
    /// Normalizes `text`.
    #[must_use]
    pub fn normalize(text: &str) -> String {
        let unified = text.replace("\r\n", "\n").replace('\r', "\n");

        let mut out = String::with_capacity(unified.len());
        let mut pending_blank = false;
        for line in unified.lines().map(str::trim_end) {
            if line.is_empty() {
                pending_blank = !out.is_empty();
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
                if pending_blank {
                    out.push('\n');
                }
            }
            out.push_str(line);
            pending_blank = false;
        }

        out.trim().to_string()
    }
}

impl Cleaner for BasicCleaner {
    fn clean(&self, doc: &Document) -> Document {
        Document::with_metadata(Self::normalize(&doc.text), doc.metadata.clone())
    }

    fn name(&self) -> &'static str {
        "basic"
    }
}

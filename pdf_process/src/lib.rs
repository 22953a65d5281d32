//! Per-page text extraction from PDF documents.
//!
//! Built on `lopdf`: every page's text layer is extracted and lightly
//! normalized (lines trimmed, blank lines dropped), and the document's
//! `Info` dictionary supplies title and author when present. Pages without
//! a usable text layer come back empty rather than failing the document.

mod error;
mod parser;

pub use error::{PdfProcessError, Result};

use std::path::{Path, PathBuf};

/// Text extracted from a PDF.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfText {
    /// Normalized text of each page, in page order.
    pub pages: Vec<String>,
    /// Number of pages in the document.
    pub page_count: usize,
    /// `Title` from the document info dictionary.
    pub title: Option<String>,
    /// `Author` from the document info dictionary.
    pub author: Option<String>,
}

impl PdfText {
    /// Page texts joined by a blank line.
    #[must_use]
    pub fn joined(&self) -> String {
        self.pages.join("\n\n")
    }

    /// Number of pages that produced no text.
    #[must_use]
    pub fn empty_pages(&self) -> usize {
        self.pages.iter().filter(|page| page.is_empty()).count()
    }
}

/// PDF processor entrypoint.
#[derive(Debug, Clone)]
pub struct PdfProcessor {
    source: PdfSource,
}

#[derive(Debug, Clone)]
enum PdfSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl PdfProcessor {
    /// Build a processor from a PDF file path.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: PdfSource::Path(path.into()),
        }
    }

    /// Build a processor from PDF bytes.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            source: PdfSource::Bytes(bytes.into()),
        }
    }

    /// Extract the text of every page.
    ///
    /// # Errors
    /// Returns [`PdfProcessError::Io`] if the file cannot be read and
    /// [`PdfProcessError::Parse`] if the input is not a valid PDF.
    pub fn extract(&self) -> Result<PdfText> {
        let text = match &self.source {
            PdfSource::Path(path) => parser::parse_from_path(path)?,
            PdfSource::Bytes(bytes) => parser::parse_from_bytes(bytes)?,
        };
        tracing::debug!(
            source = ?self.source_path(),
            pages = text.page_count,
            "extracted PDF text"
        );
        Ok(text)
    }

    /// Returns source path if available.
    #[must_use]
    pub fn source_path(&self) -> Option<&Path> {
        match &self.source {
            PdfSource::Path(path) => Some(path.as_path()),
            PdfSource::Bytes(_) => None,
        }
    }
}

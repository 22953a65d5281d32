use std::path::Path;

use ragprep_core::{Document, Result};

use super::{Loader, file_metadata, read_lossy};

/// Loads a plain text file as a single document.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextLoader;

impl Loader for TextLoader {
    fn load(&self, path: &Path) -> Result<Vec<Document>> {
        let text = read_lossy(path)?;
        Ok(vec![Document::with_metadata(
            text,
            file_metadata(path, self.file_type()),
        )])
    }

    fn file_type(&self) -> &'static str {
        "text"
    }
}

/// Loads a Markdown file verbatim, markup included.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownLoader;

impl Loader for MarkdownLoader {
    fn load(&self, path: &Path) -> Result<Vec<Document>> {
        let text = read_lossy(path)?;
        Ok(vec![Document::with_metadata(
            text,
            file_metadata(path, self.file_type()),
        )])
    }

    fn file_type(&self) -> &'static str {
        "markdown"
    }
}

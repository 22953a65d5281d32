use std::path::Path;

use ragprep_core::{Document, Result};

use super::{Loader, file_metadata};

/// Rendering width; wide enough that paragraphs are not re-wrapped.
const RENDER_WIDTH: usize = 10_000;

/// Loads an HTML file as its rendered text, without markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLoader;

impl Loader for HtmlLoader {
    fn load(&self, path: &Path) -> Result<Vec<Document>> {
        let bytes = std::fs::read(path).map_err(|e| ragprep_core::PrepError::load(path, e))?;
        let rendered = html2text::from_read(bytes.as_slice(), RENDER_WIDTH);
        let text = rendered
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();

        Ok(vec![Document::with_metadata(
            text,
            file_metadata(path, self.file_type()),
        )])
    }

    fn file_type(&self) -> &'static str {
        "html"
    }
}

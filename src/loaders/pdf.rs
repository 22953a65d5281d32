use std::path::Path;

use ragprep_core::{Document, PrepError, Result};
use ragprep_pdf::PdfProcessor;
use serde_json::Value;

use super::{Loader, file_metadata};

/// Loads a PDF's text layer, pages separated by a blank line.
///
/// Adds `num_pages` and `empty_pages` (pages without a text layer), plus
/// `title`/`author` when the document declares them.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfLoader;

impl Loader for PdfLoader {
    fn load(&self, path: &Path) -> Result<Vec<Document>> {
        let pdf = PdfProcessor::from_path(path)
            .extract()
            .map_err(|e| PrepError::load(path, e))?;

        let mut metadata = file_metadata(path, self.file_type());
        metadata.insert("num_pages".into(), Value::from(pdf.page_count));
        let empty_pages = pdf.empty_pages();
        metadata.insert("empty_pages".into(), Value::from(empty_pages));
        if empty_pages > 0 {
            tracing::warn!(
                path = %path.display(),
                empty_pages,
                num_pages = pdf.page_count,
                "PDF pages without extractable text"
            );
        }
        if let Some(title) = &pdf.title {
            metadata.insert("title".into(), Value::from(title.as_str()));
        }
        if let Some(author) = &pdf.author {
            metadata.insert("author".into(), Value::from(author.as_str()));
        }

        Ok(vec![Document::with_metadata(pdf.joined(), metadata)])
    }

    fn file_type(&self) -> &'static str {
        "pdf"
    }
}

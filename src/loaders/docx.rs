use std::path::Path;

use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use ragprep_core::{Document, PrepError, Result};

use super::{Loader, file_metadata};

/// Loads a Word document's body paragraphs, separated by a blank line.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxLoader;

impl Loader for DocxLoader {
    fn load(&self, path: &Path) -> Result<Vec<Document>> {
        let bytes = std::fs::read(path).map_err(|e| PrepError::load(path, e))?;
        let docx = docx_rs::read_docx(&bytes).map_err(|e| PrepError::load(path, e))?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(paragraph) => Some(paragraph),
                _ => None,
            })
            .map(|paragraph| {
                let mut text = String::new();
                for child in &paragraph.children {
                    if let ParagraphChild::Run(run) = child {
                        for run_child in &run.children {
                            if let RunChild::Text(t) = run_child {
                                text.push_str(&t.text);
                            }
                        }
                    }
                }
                text
            })
            .collect();

        Ok(vec![Document::with_metadata(
            paragraphs.join("\n\n"),
            file_metadata(path, self.file_type()),
        )])
    }

    fn file_type(&self) -> &'static str {
        "docx"
    }
}

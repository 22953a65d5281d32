use std::path::Path;

use lopdf::Document;

use crate::PdfText;
use crate::error::{PdfProcessError, Result};

pub(crate) fn parse_from_path(path: &Path) -> Result<PdfText> {
    let bytes = std::fs::read(path)?;
    parse_from_bytes(&bytes)
}

pub(crate) fn parse_from_bytes(bytes: &[u8]) -> Result<PdfText> {
    let doc = Document::load_mem(bytes).map_err(|e| PdfProcessError::Parse(e.to_string()))?;
    Ok(parse_document(&doc))
}

fn parse_document(doc: &Document) -> PdfText {
    let mut page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    page_numbers.sort_unstable();

    let pages = page_numbers
        .iter()
        .map(|&page_number| match doc.extract_text(&[page_number]) {
            Ok(raw) => normalize_text(&raw),
            Err(e) => {
                tracing::warn!(page = page_number, error = %e, "no extractable text on page");
                String::new()
            }
        })
        .collect::<Vec<_>>();

    let (title, author) = extract_info(doc);

    PdfText {
        page_count: page_numbers.len(),
        pages,
        title,
        author,
    }
}

fn normalize_text(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn extract_info(doc: &Document) -> (Option<String>, Option<String>) {
    let Some(dict) = doc
        .trailer
        .get(b"Info")
        .ok()
        .and_then(|info| info.as_reference().ok())
        .and_then(|id| doc.get_dictionary(id).ok())
    else {
        return (None, None);
    };

    let field = |key: &[u8]| {
        dict.get(key)
            .ok()
            .and_then(|v| v.as_str().ok())
            .map(to_clean_string)
            .filter(|s| !s.is_empty())
    };

    (field(b"Title"), field(b"Author"))
}

fn to_clean_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_string()
}

//! File loaders.
//!
//! A [`Loader`] turns one file into one or more [`Document`]s. The
//! [`LoaderRegistry`] picks a loader by file extension.

mod csv;
mod directory;
#[cfg(feature = "docx")]
mod docx;
mod html;
#[cfg(feature = "pdf")]
mod pdf;
mod text;

pub use self::csv::CsvLoader;
pub use directory::PathFilter;
#[cfg(feature = "docx")]
pub use docx::DocxLoader;
pub use html::HtmlLoader;
#[cfg(feature = "pdf")]
pub use pdf::PdfLoader;
pub use text::{MarkdownLoader, TextLoader};

pub(crate) use directory::walk_files;

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use ragprep_core::{Document, Metadata, Result, SOURCE_ID};
use serde_json::Value;

/// Reads a file into documents.
pub trait Loader: Send + Sync {
    /// Loads `path`.
    ///
    /// Most formats yield a single document; row-oriented formats such as
    /// CSV yield one per record.
    ///
    /// # Errors
    /// Returns [`PrepError::Load`](ragprep_core::PrepError::Load) if the file
    /// cannot be read or parsed.
    fn load(&self, path: &Path) -> Result<Vec<Document>>;

    /// Value recorded under the `file_type` metadata key.
    fn file_type(&self) -> &'static str;
}

/// Metadata every loader attaches: `source_id`, `source_path`,
/// `file_type` and `file_name`.
pub(crate) fn file_metadata(path: &Path, file_type: &str) -> Metadata {
    let path_str = path.to_string_lossy().into_owned();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut metadata = Metadata::new();
    metadata.insert(SOURCE_ID.into(), Value::from(path_str.clone()));
    metadata.insert("source_path".into(), Value::from(path_str));
    metadata.insert("file_type".into(), Value::from(file_type));
    metadata.insert("file_name".into(), Value::from(file_name));
    metadata
}

/// Reads a file as UTF-8, replacing invalid sequences.
pub(crate) fn read_lossy(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| ragprep_core::PrepError::load(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Maps file extensions to loaders.
///
/// Extensions are stored lowercase without the leading dot, so `".TXT"`,
/// `"txt"` and `"Txt"` name the same entry.
#[derive(Clone)]
pub struct LoaderRegistry {
    loaders: HashMap<String, Arc<dyn Loader>>,
}

impl fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderRegistry")
            .field("extensions", &self.extensions())
            .finish()
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl LoaderRegistry {
    /// Create a registry with no loaders.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            loaders: HashMap::new(),
        }
    }

    /// Create a registry with the built-in loaders.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register("txt", TextLoader);
        registry.register("md", MarkdownLoader);
        registry.register("markdown", MarkdownLoader);
        registry.register("html", HtmlLoader);
        registry.register("htm", HtmlLoader);
        registry.register("csv", CsvLoader);
        #[cfg(feature = "pdf")]
        registry.register("pdf", PdfLoader);
        #[cfg(feature = "docx")]
        registry.register("docx", DocxLoader);
        registry
    }

    /// Register a loader for an extension, replacing any previous one.
    pub fn register(&mut self, extension: &str, loader: impl Loader + 'static) {
        self.loaders
            .insert(normalize_extension(extension), Arc::new(loader));
    }

    /// Get the loader for an extension.
    #[must_use]
    pub fn get(&self, extension: &str) -> Option<&dyn Loader> {
        self.loaders
            .get(&normalize_extension(extension))
            .map(AsRef::as_ref)
    }

    /// Get the loader for a path's extension.
    #[must_use]
    pub fn for_path(&self, path: &Path) -> Option<&dyn Loader> {
        path.extension()
            .and_then(|ext| self.get(&ext.to_string_lossy()))
    }

    /// All registered extensions, sorted.
    #[must_use]
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.loaders.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_lowercase()
}

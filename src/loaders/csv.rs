use std::path::Path;

use ragprep_core::{Document, PrepError, Result, SOURCE_ID};
use serde_json::Value;

use super::{Loader, file_metadata, read_lossy};

/// Loads a CSV file with a header row, one document per record.
///
/// Each record becomes `"column: value"` lines; empty values are left out.
/// Documents get `source_id = "{path}_row_{i}"`, plus `row_index` and the
/// header list under `csv_columns`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvLoader;

impl Loader for CsvLoader {
    fn load(&self, path: &Path) -> Result<Vec<Document>> {
        let content = read_lossy(path)?;
        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| PrepError::load(path, e))?
            .clone();
        let columns: Vec<Value> = headers.iter().map(Value::from).collect();
        let path_str = path.to_string_lossy();

        reader
            .records()
            .enumerate()
            .map(|(row, record)| {
                let record = record.map_err(|e| PrepError::load(path, e))?;
                let text = headers
                    .iter()
                    .zip(record.iter())
                    .filter(|(_, value)| !value.is_empty())
                    .map(|(column, value)| format!("{column}: {value}"))
                    .collect::<Vec<_>>()
                    .join("\n");

                let mut metadata = file_metadata(path, self.file_type());
                metadata.insert(SOURCE_ID.into(), Value::from(format!("{path_str}_row_{row}")));
                metadata.insert("row_index".into(), Value::from(row));
                metadata.insert("csv_columns".into(), Value::Array(columns.clone()));
                Ok(Document::with_metadata(text, metadata))
            })
            .collect()
    }

    fn file_type(&self) -> &'static str {
        "csv"
    }
}

//! Table reader trait and common types
//!
//! The `TableReader` trait provides a uniform interface for loading a
//! whole table from the supported file formats.

use std::path::Path;
use thiserror::Error;

use crate::table::Table;

/// Errors that can occur during I/O operations
#[derive(Debug, Error)]
pub enum IoError {
    #[error("Data file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    ShapeMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;

/// Trait for reading tabular data from various formats
///
/// Implementations must preserve row order and column order.
pub trait TableReader {
    /// Read the full table
    fn read_table(&self) -> IoResult<Table>;

    /// Get the format name
    fn format_name(&self) -> &'static str;
}

/// A boxed reader for dynamic dispatch
pub type BoxedReader = Box<dyn TableReader>;

/// Lowercased file extension of a path
pub(crate) fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default()
}

/// Open a file and return an appropriate reader
///
/// The format is auto-detected from the file extension.
pub fn open_file(path: impl AsRef<Path>) -> IoResult<BoxedReader> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileNotFound(path.display().to_string()));
    }

    let extension = extension_of(path);
    match extension.as_str() {
        #[cfg(feature = "csv")]
        "csv" | "txt" => {
            use crate::csv_reader::CsvReader;
            Ok(Box::new(CsvReader::open(path)?))
        }

        #[cfg(feature = "csv")]
        "tsv" => {
            use crate::csv_reader::CsvReader;
            Ok(Box::new(CsvReader::open_with_delimiter(path, b'\t')?))
        }

        "json" => {
            use crate::json_reader::JsonReader;
            Ok(Box::new(JsonReader::open(path)?))
        }

        _ => Err(IoError::InvalidFormat(format!(
            "Unknown file extension: '{}' (supported: {})",
            extension,
            supported_extensions().join(", ")
        ))),
    }
}

/// Open a file and read it into a table in one step
pub fn read_table(path: impl AsRef<Path>) -> IoResult<Table> {
    let reader = open_file(path)?;
    let table = reader.read_table()?;
    tracing::debug!(
        format = reader.format_name(),
        rows = table.num_rows(),
        columns = table.num_columns(),
        "loaded table"
    );
    Ok(table)
}

/// List supported file extensions
pub fn supported_extensions() -> Vec<&'static str> {
    let mut extensions = Vec::new();

    #[cfg(feature = "csv")]
    {
        extensions.push("csv");
        extensions.push("tsv");
        extensions.push("txt");
    }

    extensions.push("json");

    extensions
}

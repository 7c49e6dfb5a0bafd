//! Table writer
//!
//! Tables are rendered fully in memory and written in a single call, so a
//! failed run never leaves a half-written file behind.

use serde_json::{Map, Number, Value};
use std::fs;
use std::path::Path;

use crate::reader::{extension_of, IoError, IoResult};
use crate::table::{DataColumn, Table};

/// Render a table as a JSON array of records
pub fn table_to_json(table: &Table) -> Value {
    let rows = (0..table.num_rows())
        .map(|row| {
            let mut record = Map::new();
            for column in table.columns() {
                let cell = match &column.data {
                    DataColumn::Numeric(v) => number_value(v[row]),
                    DataColumn::Text(v) => Value::String(v[row].clone()),
                };
                record.insert(column.name.clone(), cell);
            }
            Value::Object(record)
        })
        .collect();
    Value::Array(rows)
}

/// Integral values are written as JSON integers; missing values as null.
fn number_value(x: f64) -> Value {
    if !x.is_finite() {
        return Value::Null;
    }
    if x.fract() == 0.0 && x.abs() < 9.0e15 {
        return Value::from(x as i64);
    }
    Number::from_f64(x).map(Value::Number).unwrap_or(Value::Null)
}

/// Render a table as delimited text with a header row
#[cfg(feature = "csv")]
pub fn table_to_delimited(table: &Table, delimiter: u8) -> IoResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer
        .write_record(table.column_names())
        .map_err(|e| IoError::InvalidFormat(e.to_string()))?;
    for row in 0..table.num_rows() {
        let record: Vec<String> = table
            .columns()
            .iter()
            .map(|c| c.data.cell_text(row).unwrap_or_default())
            .collect();
        writer
            .write_record(&record)
            .map_err(|e| IoError::InvalidFormat(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| IoError::InvalidFormat(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| IoError::InvalidFormat(e.to_string()))
}

/// Write a table to disk, choosing the format from the file extension
pub fn write_table(table: &Table, path: impl AsRef<Path>) -> IoResult<()> {
    let path = path.as_ref();
    let contents = match extension_of(path).as_str() {
        "json" => serde_json::to_string_pretty(&table_to_json(table))
            .map_err(|e| IoError::InvalidFormat(e.to_string()))?,
        #[cfg(feature = "csv")]
        "csv" | "txt" => table_to_delimited(table, b',')?,
        #[cfg(feature = "csv")]
        "tsv" => table_to_delimited(table, b'\t')?,
        other => {
            return Err(IoError::InvalidFormat(format!(
                "cannot write tables with extension '{}'",
                other
            )))
        }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}

//! JSON table reader
//!
//! Accepts two layouts:
//! - records: `[{"x": "A", "y": 1}, {"x": "B", "y": 2}]`
//! - columns: `{"x": ["A", "B"], "y": [1, 2]}`
//!
//! A column is numeric when every non-null cell is a JSON number.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::reader::{IoError, IoResult, TableReader};
use crate::table::{Column, DataColumn, Table};

/// JSON file reader
pub struct JsonReader {
    path: PathBuf,
}

impl JsonReader {
    /// Open a JSON file
    pub fn open(path: impl AsRef<Path>) -> IoResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IoError::FileNotFound(path.display().to_string()));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

impl TableReader for JsonReader {
    fn read_table(&self) -> IoResult<Table> {
        let text = fs::read_to_string(&self.path)?;
        parse_json_table(&text)
    }

    fn format_name(&self) -> &'static str {
        "JSON"
    }
}

/// Parse a JSON document into a table
pub fn parse_json_table(text: &str) -> IoResult<Table> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| IoError::InvalidFormat(e.to_string()))?;

    match value {
        Value::Array(records) => from_records(records),
        Value::Object(columns) => from_columns(columns),
        _ => Err(IoError::InvalidFormat(
            "expected an array of records or an object of columns".to_string(),
        )),
    }
}

fn from_records(records: Vec<Value>) -> IoResult<Table> {
    // Column order follows first appearance across records.
    let mut names: Vec<String> = Vec::new();
    for record in &records {
        let Value::Object(fields) = record else {
            return Err(IoError::InvalidFormat(
                "every record must be a JSON object".to_string(),
            ));
        };
        for key in fields.keys() {
            if !names.contains(key) {
                names.push(key.clone());
            }
        }
    }

    let columns = names
        .into_iter()
        .map(|name| {
            let cells: Vec<Value> = records
                .iter()
                .map(|r| r.get(&name).cloned().unwrap_or(Value::Null))
                .collect();
            Column::new(name, cells_to_column(&cells))
        })
        .collect();

    Table::from_columns(columns)
}

fn from_columns(columns: Map<String, Value>) -> IoResult<Table> {
    let columns = columns
        .into_iter()
        .map(|(name, cells)| match cells {
            Value::Array(cells) => Ok(Column::new(name, cells_to_column(&cells))),
            _ => Err(IoError::InvalidFormat(format!(
                "column '{}' must be an array",
                name
            ))),
        })
        .collect::<IoResult<Vec<_>>>()?;

    Table::from_columns(columns)
}

fn cells_to_column(cells: &[Value]) -> DataColumn {
    let numeric = cells.iter().any(|v| v.is_number())
        && cells.iter().all(|v| v.is_number() || v.is_null());

    if numeric {
        DataColumn::Numeric(
            cells
                .iter()
                .map(|v| v.as_f64().unwrap_or(f64::NAN))
                .collect(),
        )
    } else {
        DataColumn::Text(
            cells
                .iter()
                .map(|v| match v {
                    Value::Null => String::new(),
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        )
    }
}

//! Table and column types for data representation

use serde::{Deserialize, Serialize};

use crate::reader::{IoError, IoResult};

/// Column data type, as inferred from source cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Int64,
    Float64,
    Bool,
    String,
}

impl ColumnType {
    /// Check if this is a numeric type
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Int64 | ColumnType::Float64)
    }
}

/// Strings that denote a missing cell
const MISSING_MARKERS: [&str; 6] = ["", "na", "nan", "null", "none", "n/a"];

/// Check whether a raw cell denotes a missing value
pub fn is_missing_cell(cell: &str) -> bool {
    let trimmed = cell.trim();
    MISSING_MARKERS
        .iter()
        .any(|m| trimmed.eq_ignore_ascii_case(m))
}

/// Infer column type from raw cell values
///
/// Missing cells are ignored; a column with no present cells is `String`.
pub fn infer_type<S: AsRef<str>>(values: &[S]) -> ColumnType {
    let present: Vec<&str> = values
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !is_missing_cell(s))
        .collect();
    if present.is_empty() {
        return ColumnType::String;
    }

    if present.iter().all(|s| s.parse::<i64>().is_ok()) {
        return ColumnType::Int64;
    }

    if present.iter().all(|s| s.parse::<f64>().is_ok()) {
        return ColumnType::Float64;
    }

    if present
        .iter()
        .all(|s| matches!(s.to_lowercase().as_str(), "true" | "false"))
    {
        return ColumnType::Bool;
    }

    ColumnType::String
}

/// Parse raw cells into a column of the given type
pub fn parse_column(values: Vec<String>, dtype: ColumnType) -> DataColumn {
    if dtype.is_numeric() {
        DataColumn::Numeric(
            values
                .iter()
                .map(|s| {
                    if is_missing_cell(s) {
                        f64::NAN
                    } else {
                        s.trim().parse().unwrap_or(f64::NAN)
                    }
                })
                .collect(),
        )
    } else {
        DataColumn::Text(values)
    }
}

/// A column of data
#[derive(Debug, Clone, PartialEq)]
pub enum DataColumn {
    /// Numbers; NaN marks a missing cell
    Numeric(Vec<f64>),
    /// Anything else, kept verbatim
    Text(Vec<String>),
}

impl DataColumn {
    /// Get the number of elements
    pub fn len(&self) -> usize {
        match self {
            DataColumn::Numeric(v) => v.len(),
            DataColumn::Text(v) => v.len(),
        }
    }

    /// Check if the column is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if the column holds numbers
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataColumn::Numeric(_))
    }

    /// Borrow the numeric values
    pub fn as_numeric(&self) -> Option<&[f64]> {
        match self {
            DataColumn::Numeric(v) => Some(v),
            DataColumn::Text(_) => None,
        }
    }

    /// Render one cell as display text (missing numbers render empty)
    pub fn cell_text(&self, row: usize) -> Option<String> {
        match self {
            DataColumn::Numeric(v) => v.get(row).map(|x| format_number(*x)),
            DataColumn::Text(v) => v.get(row).cloned(),
        }
    }

    /// Gather rows by index into a new column
    pub fn take(&self, rows: &[usize]) -> DataColumn {
        match self {
            DataColumn::Numeric(v) => DataColumn::Numeric(rows.iter().map(|&i| v[i]).collect()),
            DataColumn::Text(v) => DataColumn::Text(rows.iter().map(|&i| v[i].clone()).collect()),
        }
    }
}

/// Format a number for text output; missing values become an empty string
pub fn format_number(x: f64) -> String {
    if x.is_finite() {
        x.to_string()
    } else {
        String::new()
    }
}

/// A named column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: DataColumn,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, data: DataColumn) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Create a numeric column
    pub fn numeric(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, DataColumn::Numeric(values))
    }

    /// Create a text column
    pub fn text<S: Into<String>>(name: impl Into<String>, values: impl IntoIterator<Item = S>) -> Self {
        Self::new(
            name,
            DataColumn::Text(values.into_iter().map(Into::into).collect()),
        )
    }
}

/// An ordered collection of equally long, uniquely named columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table, checking that all columns have the same length
    pub fn from_columns(columns: Vec<Column>) -> IoResult<Self> {
        let mut table = Self::new();
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Append a column
    pub fn push_column(&mut self, column: Column) -> IoResult<()> {
        if self.has_column(&column.name) {
            return Err(IoError::InvalidFormat(format!(
                "duplicate column name '{}'",
                column.name
            )));
        }
        if let Some(first) = self.columns.first() {
            if first.data.len() != column.data.len() {
                return Err(IoError::ShapeMismatch {
                    column: column.name,
                    expected: first.data.len(),
                    actual: column.data.len(),
                });
            }
        }
        self.columns.push(column);
        Ok(())
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.columns.first().map(|c| c.data.len()).unwrap_or(0)
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// All columns in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Consume the table, returning its columns
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Check if a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// The first numeric column, if any
    pub fn first_numeric_column(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.data.is_numeric())
    }

    /// Borrow a numeric column's values by name
    pub fn numeric_values(&self, name: &str) -> Option<&[f64]> {
        self.column(name).and_then(|c| c.data.as_numeric())
    }

    /// Gather rows by index into a new table
    ///
    /// Panics if an index is out of bounds.
    pub fn take_rows(&self, rows: &[usize]) -> Table {
        Table {
            columns: self
                .columns
                .iter()
                .map(|c| Column::new(c.name.clone(), c.data.take(rows)))
                .collect(),
        }
    }

    /// Return a copy with one column renamed
    pub fn with_renamed_column(mut self, from: &str, to: &str) -> Table {
        if let Some(column) = self.columns.iter_mut().find(|c| c.name == from) {
            column.name = to.to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_columns(vec![
            Column::text("region", ["north", "south", "east"]),
            Column::numeric("sales", vec![10.0, f64::NAN, 30.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_column_lookup() {
        let table = sample();
        assert_eq!(table.column_index("region"), Some(0));
        assert_eq!(table.column_index("sales"), Some(1));
        assert_eq!(table.column_index("cost"), None);
        assert_eq!(table.first_numeric_column().map(|c| c.name.as_str()), Some("sales"));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let err = Table::from_columns(vec![
            Column::numeric("a", vec![1.0, 2.0]),
            Column::numeric("b", vec![1.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, IoError::ShapeMismatch { expected: 2, actual: 1, .. }));
    }

    #[test]
    fn test_take_rows() {
        let table = sample().take_rows(&[2, 0]);
        assert_eq!(table.numeric_values("sales"), Some(&[30.0, 10.0][..]));
        assert_eq!(table.column("region").unwrap().data.cell_text(0).as_deref(), Some("east"));
    }

    #[test]
    fn test_infer_type() {
        assert_eq!(infer_type(&["1", "2", ""]), ColumnType::Int64);
        assert_eq!(infer_type(&["1.5", "NaN", "3"]), ColumnType::Float64);
        assert_eq!(infer_type(&["true", "False"]), ColumnType::Bool);
        assert_eq!(infer_type(&["hello", "1"]), ColumnType::String);
        assert_eq!(infer_type(&["", "NA"]), ColumnType::String);
    }

    #[test]
    fn test_parse_column_missing_cells() {
        let col = parse_column(vec!["1".into(), "".into(), "n/a".into()], ColumnType::Int64);
        let values = col.as_numeric().unwrap();
        assert_eq!(values[0], 1.0);
        assert!(values[1].is_nan() && values[2].is_nan());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(f64::NAN), "");
    }
}

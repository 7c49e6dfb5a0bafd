//! Column selection and validation against a loaded table

use dataviz_io::Table;

use crate::error::{DatasetError, DatasetResult};

/// The numeric column a detection run scans
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetColumn<'a> {
    pub name: &'a str,
    pub values: &'a [f64],
    /// True when no column was requested and the first numeric one was taken
    pub auto_selected: bool,
}

/// Resolve the column to analyze
///
/// A requested column must exist and be numeric. Without a request the
/// first numeric column is used.
pub fn select_target_column<'a>(
    table: &'a Table,
    requested: Option<&str>,
) -> DatasetResult<TargetColumn<'a>> {
    match requested {
        Some(name) => {
            let column = table
                .column(name)
                .ok_or_else(|| DatasetError::column_not_found(name, &table.column_names()))?;
            let values = column
                .data
                .as_numeric()
                .ok_or_else(|| DatasetError::NonNumericColumn {
                    column: name.to_string(),
                })?;
            Ok(TargetColumn {
                name: &column.name,
                values,
                auto_selected: false,
            })
        }
        None => {
            let column = table
                .first_numeric_column()
                .ok_or(DatasetError::NoNumericColumns)?;
            tracing::info!("Auto-selected column: {}", column.name);
            Ok(TargetColumn {
                name: &column.name,
                values: column.data.as_numeric().unwrap_or_default(),
                auto_selected: true,
            })
        }
    }
}

/// Check that every named column exists
pub fn require_columns<'n>(
    table: &Table,
    names: impl IntoIterator<Item = &'n str>,
) -> DatasetResult<()> {
    for name in names {
        if !table.has_column(name) {
            return Err(DatasetError::column_not_found(name, &table.column_names()));
        }
    }
    Ok(())
}

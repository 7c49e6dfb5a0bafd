use dataviz_io::{format_number, Column, DataColumn, Table};
use dataviz_stats::is_missing;

use super::sort::sorted_rows;
use super::SortOrder;
use crate::error::{DatasetError, DatasetResult, VizResult};

/// Label of the row that absorbs collapsed categories
pub const OTHER_LABEL: &str = "Other";

fn sum_present(values: &[f64], rows: std::ops::Range<usize>) -> f64 {
    values[rows].iter().filter(|v| !is_missing(**v)).sum()
}

/// Cells of a column as text, with "Other" appended
fn text_with_other(data: &DataColumn) -> DataColumn {
    let mut cells: Vec<String> = match data {
        DataColumn::Numeric(values) => values.iter().map(|v| format_number(*v)).collect(),
        DataColumn::Text(values) => values.clone(),
    };
    cells.push(OTHER_LABEL.to_string());
    DataColumn::Text(cells)
}

fn require<'a>(table: &'a Table, name: &str) -> DatasetResult<&'a Column> {
    table
        .column(name)
        .ok_or_else(|| DatasetError::column_not_found(name, &table.column_names()))
}

/// Keep the first `max_categories` rows and fold the rest into one "Other" row
///
/// Numeric columns of the "Other" row hold the sum of the folded rows;
/// every other column holds the literal "Other". A numeric x column becomes
/// text. Tables with at most `max_categories` rows, and a limit of zero,
/// pass through unchanged.
pub fn collapse_categories(
    table: &Table,
    x_column: &str,
    max_categories: usize,
) -> VizResult<Table> {
    require(table, x_column)?;
    let n = table.num_rows();
    if max_categories == 0 || n <= max_categories {
        return Ok(table.clone());
    }

    let kept: Vec<usize> = (0..max_categories).collect();
    let mut columns = Vec::with_capacity(table.num_columns());
    for column in table.columns() {
        let data = match &column.data {
            DataColumn::Numeric(values) if column.name != x_column => {
                let mut out: Vec<f64> = values[..max_categories].to_vec();
                out.push(sum_present(values, max_categories..n));
                DataColumn::Numeric(out)
            }
            data => text_with_other(&data.take(&kept)),
        };
        columns.push(Column::new(column.name.clone(), data));
    }

    tracing::debug!(
        kept = max_categories,
        folded = n - max_categories,
        "collapsed categories"
    );
    Ok(Table::from_columns(columns)?)
}

/// Limit a pie chart to `max_slices` slices
///
/// Rows are ordered by `y_column` descending; the largest
/// `max_slices - 1` are kept and the rest become one "Other" slice holding
/// their sum. Other columns of that slice are empty (text) or missing
/// (numeric). Tables with at most `max_slices` rows, and a limit of zero,
/// pass through unchanged.
pub fn group_small_slices(
    table: &Table,
    x_column: &str,
    y_column: &str,
    max_slices: usize,
) -> VizResult<Table> {
    require(table, x_column)?;
    let y = require(table, y_column)?;
    let values = y
        .data
        .as_numeric()
        .ok_or_else(|| DatasetError::NonNumericColumn {
            column: y_column.to_string(),
        })?;
    let n = table.num_rows();
    if max_slices == 0 || n <= max_slices {
        return Ok(table.clone());
    }

    let order = sorted_rows(&y.data, SortOrder::Desc);
    let keep = max_slices - 1;
    let rest: f64 = order[keep..]
        .iter()
        .map(|&r| values[r])
        .filter(|v| !is_missing(*v))
        .sum();
    let kept = table.take_rows(&order[..keep]);

    let mut columns = Vec::with_capacity(table.num_columns());
    for column in kept.into_columns() {
        let data = if column.name == x_column {
            text_with_other(&column.data)
        } else {
            match column.data {
                DataColumn::Numeric(mut out) => {
                    out.push(if column.name == y_column { rest } else { f64::NAN });
                    DataColumn::Numeric(out)
                }
                DataColumn::Text(mut out) => {
                    out.push(String::new());
                    DataColumn::Text(out)
                }
            }
        };
        columns.push(Column::new(column.name, data));
    }
    Ok(Table::from_columns(columns)?)
}

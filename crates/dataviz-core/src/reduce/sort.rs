use std::cmp::Ordering;

use dataviz_io::{DataColumn, Table};
use dataviz_stats::is_missing;

use super::SortOrder;
use crate::error::{DatasetError, DatasetResult};

/// Compare two numbers, placing missing values last in either order
pub(crate) fn compare_values(a: f64, b: f64, order: SortOrder) -> Ordering {
    match (is_missing(a), is_missing(b)) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => order.apply(a.partial_cmp(&b).unwrap_or(Ordering::Equal)),
    }
}

/// Row order that sorts a table by one column
pub(crate) fn sorted_rows(data: &DataColumn, order: SortOrder) -> Vec<usize> {
    let mut rows: Vec<usize> = (0..data.len()).collect();
    match data {
        DataColumn::Numeric(values) => {
            rows.sort_by(|&a, &b| compare_values(values[a], values[b], order))
        }
        DataColumn::Text(values) => rows.sort_by(|&a, &b| order.apply(values[a].cmp(&values[b]))),
    }
    rows
}

/// Stable sort of all rows by one column
pub fn sort_table(table: &Table, column: &str, order: SortOrder) -> DatasetResult<Table> {
    let data = &table
        .column(column)
        .ok_or_else(|| DatasetError::column_not_found(column, &table.column_names()))?
        .data;
    Ok(table.take_rows(&sorted_rows(data, order)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataviz_io::Column;

    fn table() -> Table {
        Table::from_columns(vec![
            Column::text("name", ["a", "b", "c", "d", "e"]),
            Column::numeric("score", vec![2.0, f64::NAN, 5.0, 2.0, 1.0]),
        ])
        .unwrap()
    }

    fn names(table: &Table) -> Vec<String> {
        (0..table.num_rows())
            .filter_map(|row| table.column("name")?.data.cell_text(row))
            .collect()
    }

    #[test]
    fn test_descending_is_stable_with_missing_last() {
        let sorted = sort_table(&table(), "score", SortOrder::Desc).unwrap();
        assert_eq!(names(&sorted), ["c", "a", "d", "e", "b"]);
    }

    #[test]
    fn test_ascending_with_missing_last() {
        let sorted = sort_table(&table(), "score", SortOrder::Asc).unwrap();
        assert_eq!(names(&sorted), ["e", "a", "d", "c", "b"]);
    }

    #[test]
    fn test_text_column() {
        let sorted = sort_table(&table(), "name", SortOrder::Desc).unwrap();
        assert_eq!(names(&sorted), ["e", "d", "c", "b", "a"]);
    }

    #[test]
    fn test_missing_column() {
        assert!(matches!(
            sort_table(&table(), "rank", SortOrder::Asc),
            Err(DatasetError::ColumnNotFound { .. })
        ));
    }
}

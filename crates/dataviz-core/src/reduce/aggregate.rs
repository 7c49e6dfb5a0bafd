use std::cmp::Ordering;

use dataviz_io::{Column, DataColumn, Table};
use dataviz_stats::{is_missing, Aggregation};

use crate::error::{DatasetError, VizResult};

/// Row indices of each group, groups in ascending key order
fn group_rows(key: &DataColumn) -> Vec<Vec<usize>> {
    let mut rows: Vec<usize> = match key {
        DataColumn::Numeric(v) => (0..v.len()).filter(|&r| !is_missing(v[r])).collect(),
        DataColumn::Text(v) => (0..v.len()).filter(|&r| !v[r].is_empty()).collect(),
    };

    let same = |a: usize, b: usize| -> bool {
        match key {
            DataColumn::Numeric(v) => v[a] == v[b],
            DataColumn::Text(v) => v[a] == v[b],
        }
    };
    match key {
        DataColumn::Numeric(v) => {
            rows.sort_by(|&a, &b| v[a].partial_cmp(&v[b]).unwrap_or(Ordering::Equal))
        }
        DataColumn::Text(v) => rows.sort_by(|&a, &b| v[a].cmp(&v[b])),
    }

    let mut groups: Vec<Vec<usize>> = Vec::new();
    for row in rows {
        let continues = groups.last().is_some_and(|group| same(group[0], row));
        if continues {
            if let Some(group) = groups.last_mut() {
                group.push(row);
            }
        } else {
            groups.push(vec![row]);
        }
    }
    groups
}

/// Group rows by a key column and aggregate every other numeric column
///
/// The key column comes first in the result, followed by the aggregated
/// columns in their original order. Text columns other than the key are
/// dropped and rows with a missing key are ignored. When `x_column` names a
/// column that does not exist after aggregation, the key takes that name.
pub fn aggregate(
    table: &Table,
    group_by: &str,
    agg: Aggregation,
    x_column: Option<&str>,
) -> VizResult<Table> {
    let key = table
        .column(group_by)
        .ok_or_else(|| DatasetError::column_not_found(group_by, &table.column_names()))?;
    let groups = group_rows(&key.data);
    let firsts: Vec<usize> = groups.iter().map(|g| g[0]).collect();

    let mut columns = vec![Column::new(group_by, key.data.take(&firsts))];
    for column in table.columns() {
        if column.name == group_by {
            continue;
        }
        let Some(values) = column.data.as_numeric() else {
            continue;
        };
        let aggregated = groups
            .iter()
            .map(|group| {
                let members: Vec<f64> = group.iter().map(|&r| values[r]).collect();
                agg.apply(&members)
            })
            .collect();
        columns.push(Column::numeric(column.name.clone(), aggregated));
    }

    let mut result = Table::from_columns(columns)?;
    if let Some(x) = x_column {
        if !result.has_column(x) {
            tracing::debug!(from = group_by, to = x, "renaming group key");
            result = result.with_renamed_column(group_by, x);
        }
    }
    Ok(result)
}

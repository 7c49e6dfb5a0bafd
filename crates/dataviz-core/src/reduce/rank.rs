use serde::{Deserialize, Serialize};

use dataviz_io::Table;
use dataviz_stats::is_missing;

use super::sort::compare_values;
use super::SortOrder;
use crate::error::{DatasetError, DatasetResult};

/// Which end of the ranking to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankLimit {
    /// The N largest, shown descending
    Top(usize),
    /// The N smallest, shown ascending
    Bottom(usize),
}

impl RankLimit {
    /// Pick the limit to apply; top wins over bottom
    pub fn from_options(top: Option<usize>, bottom: Option<usize>) -> Option<Self> {
        match (top, bottom) {
            (Some(n), _) => Some(RankLimit::Top(n)),
            (None, Some(n)) => Some(RankLimit::Bottom(n)),
            (None, None) => None,
        }
    }

    pub fn count(&self) -> usize {
        match self {
            RankLimit::Top(n) | RankLimit::Bottom(n) => *n,
        }
    }

    /// Display order of the kept rows
    pub fn order(&self) -> SortOrder {
        match self {
            RankLimit::Top(_) => SortOrder::Desc,
            RankLimit::Bottom(_) => SortOrder::Asc,
        }
    }
}

/// Keep the top or bottom N rows by a numeric column
///
/// Rows with a missing value are not ranked. Ties keep the earlier row.
/// A limit of zero leaves the table unchanged.
pub fn rank_limit(table: &Table, column: &str, limit: RankLimit) -> DatasetResult<Table> {
    if limit.count() == 0 {
        return Ok(table.clone());
    }

    let column_ref = table
        .column(column)
        .ok_or_else(|| DatasetError::column_not_found(column, &table.column_names()))?;
    let values = column_ref
        .data
        .as_numeric()
        .ok_or_else(|| DatasetError::NonNumericColumn {
            column: column.to_string(),
        })?;

    let order = limit.order();
    let mut rows: Vec<usize> = (0..values.len()).filter(|&r| !is_missing(values[r])).collect();
    rows.sort_by(|&a, &b| compare_values(values[a], values[b], order));
    rows.truncate(limit.count());
    Ok(table.take_rows(&rows))
}

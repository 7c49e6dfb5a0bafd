//! Data reduction pipeline
//!
//! Shrinks a table for presentation through four optional stages, always
//! in this order:
//!
//! 1. **Aggregate**: group by a column and aggregate the numeric columns
//! 2. **Sort**: order rows by the sort column (default: the primary y column)
//! 3. **Rank-limit**: keep the top or bottom N rows
//! 4. **Collapse**: fold rows beyond `max_categories` into an "Other" row
//!
//! Every stage returns a new table. A configuration that sets none of the
//! stage parameters leaves the input untouched.

mod aggregate;
mod collapse;
mod rank;
mod sort;

pub use aggregate::aggregate;
pub use collapse::{collapse_categories, group_small_slices, OTHER_LABEL};
pub use rank::{rank_limit, RankLimit};
pub use sort::sort_table;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use dataviz_io::Table;
use dataviz_stats::Aggregation;

use crate::dataset::require_columns;
use crate::error::{ConfigError, DatasetError, DatasetResult, VizResult};

/// Row order for sorting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Orient an ascending comparison
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            _ => Err(ConfigError::UnknownSortOrder(s.to_string())),
        }
    }
}

/// Parameters of a reduction run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReductionConfig {
    /// Category column
    pub x: Option<String>,
    /// Value columns; the first is the primary one
    pub y: Vec<String>,
    pub group_by: Option<String>,
    pub agg: Option<Aggregation>,
    /// Sort column; defaults to the primary y column
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
    pub top: Option<usize>,
    pub bottom: Option<usize>,
    pub max_categories: Option<usize>,
}

impl ReductionConfig {
    /// Create a configuration for the given category and value columns
    pub fn new(x: impl Into<String>, y: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            x: Some(x.into()),
            y: y.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn group_by(mut self, column: impl Into<String>, agg: Aggregation) -> Self {
        self.group_by = Some(column.into());
        self.agg = Some(agg);
        self
    }

    pub fn sort_by(mut self, column: impl Into<String>) -> Self {
        self.sort_by = Some(column.into());
        self
    }

    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }

    pub fn top(mut self, n: usize) -> Self {
        self.top = Some(n);
        self
    }

    pub fn bottom(mut self, n: usize) -> Self {
        self.bottom = Some(n);
        self
    }

    pub fn max_categories(mut self, k: usize) -> Self {
        self.max_categories = Some(k);
        self
    }

    /// Primary value column
    pub fn primary_y(&self) -> Option<&str> {
        self.y.first().map(String::as_str)
    }

    /// Whether any stage parameter is set
    pub fn is_active(&self) -> bool {
        self.group_by.is_some()
            || self.agg.is_some()
            || self.sort_by.is_some()
            || self.top.is_some()
            || self.bottom.is_some()
            || self.max_categories.is_some()
    }

    /// Check column references against the input table
    ///
    /// The x and y columns may be absent when a group-by column is given,
    /// since aggregation can create the x column.
    pub fn validate_against(&self, table: &Table) -> DatasetResult<()> {
        match &self.group_by {
            Some(group_by) => require_columns(table, [group_by.as_str()]),
            None => require_columns(
                table,
                self.x.iter().chain(self.y.iter()).map(String::as_str),
            ),
        }
    }

    /// Column to sort and rank by in a table, if any
    fn sort_column<'a>(&'a self, table: &Table) -> DatasetResult<Option<&'a str>> {
        match &self.sort_by {
            Some(column) if table.has_column(column) => Ok(Some(column.as_str())),
            Some(column) => Err(DatasetError::column_not_found(column, &table.column_names())),
            None => Ok(self.primary_y().filter(|y| table.has_column(y))),
        }
    }
}

/// A reduced table and how much it shrank
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    pub table: Table,
    pub input_rows: usize,
    pub output_rows: usize,
}

impl Reduction {
    /// Whether any rows were removed
    pub fn shrank(&self) -> bool {
        self.output_rows < self.input_rows
    }
}

/// Run the reduction pipeline
pub fn reduce(table: &Table, config: &ReductionConfig) -> VizResult<Reduction> {
    let input_rows = table.num_rows();
    if !config.is_active() {
        return Ok(Reduction {
            table: table.clone(),
            input_rows,
            output_rows: input_rows,
        });
    }
    config.validate_against(table)?;

    let mut current = match (&config.group_by, config.agg) {
        (Some(group_by), Some(agg)) => {
            let out = aggregate(table, group_by, agg, config.x.as_deref())?;
            tracing::debug!(groups = out.num_rows(), "{} by {}", agg, group_by);
            out
        }
        _ => table.clone(),
    };

    let sort_column = config.sort_column(&current)?;
    if let Some(column) = sort_column {
        current = sort_table(&current, column, config.sort_order)?;
        tracing::debug!(column, order = %config.sort_order, "sorted");
    }

    if let Some(limit) = RankLimit::from_options(config.top, config.bottom) {
        let column = sort_column.ok_or(ConfigError::MissingParameter {
            stage: "top/bottom",
            parameter: "a sort column or y column",
        })?;
        current = rank_limit(&current, column, limit)?;
        tracing::debug!(?limit, rows = current.num_rows(), "rank limit");
    }

    if let Some(k) = config.max_categories.filter(|k| *k > 0) {
        let x = config.x.as_deref().ok_or(ConfigError::MissingParameter {
            stage: "max_categories",
            parameter: "an x column",
        })?;
        current = collapse_categories(&current, x, k)?;
    }

    let output_rows = current.num_rows();
    Ok(Reduction {
        table: current,
        input_rows,
        output_rows,
    })
}

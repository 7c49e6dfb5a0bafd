//! Aggregation kernels for grouped reduction
//!
//! Each kernel reduces a group of values to a single number and skips
//! missing entries. Empty groups follow the usual conventions: a sum of
//! nothing is zero, a count of nothing is zero, everything else is NaN.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::quantile::median;
use crate::summary::is_missing;

/// Aggregation function applied per group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Mean,
    Sum,
    Median,
    Count,
    Min,
    Max,
}

impl Aggregation {
    /// All supported aggregations
    pub const ALL: [Aggregation; 6] = [
        Aggregation::Mean,
        Aggregation::Sum,
        Aggregation::Median,
        Aggregation::Count,
        Aggregation::Min,
        Aggregation::Max,
    ];

    /// Get the lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Aggregation::Mean => "mean",
            Aggregation::Sum => "sum",
            Aggregation::Median => "median",
            Aggregation::Count => "count",
            Aggregation::Min => "min",
            Aggregation::Max => "max",
        }
    }

    /// Reduce a group of values
    pub fn apply(&self, values: &[f64]) -> f64 {
        let present = values.iter().copied().filter(|x| !is_missing(*x));
        match self {
            Aggregation::Sum => present.sum(),
            Aggregation::Count => present.count() as f64,
            Aggregation::Mean => {
                let (n, s) = present.fold((0usize, 0.0), |(n, s), x| (n + 1, s + x));
                if n == 0 {
                    f64::NAN
                } else {
                    s / n as f64
                }
            }
            Aggregation::Median => median(values),
            Aggregation::Min => present.reduce(f64::min).unwrap_or(f64::NAN),
            Aggregation::Max => present.reduce(f64::max).unwrap_or(f64::NAN),
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown aggregation name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown aggregation '{0}' (expected mean, sum, median, count, min or max)")]
pub struct UnknownAggregation(pub String);

impl FromStr for Aggregation {
    type Err = UnknownAggregation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Aggregation::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownAggregation(s.to_string()))
    }
}

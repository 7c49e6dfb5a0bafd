//! Quantiles with linear interpolation
//!
//! For sorted data `x[0..n]` the p-th quantile sits at fractional rank
//! `p * (n - 1)`; the result interpolates linearly between the two
//! neighbouring order statistics.

use serde::{Deserialize, Serialize};

use crate::summary::finite_values;

/// Quantile of already-sorted, missing-free data.
///
/// Returns `None` for empty input or `p` outside `[0, 1]`.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }

    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;

    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Quantile of arbitrary data, skipping missing values.
pub fn quantile(data: &[f64], p: f64) -> Option<f64> {
    let mut sorted = finite_values(data);
    sorted.sort_by(f64::total_cmp);
    quantile_sorted(&sorted, p)
}

/// Median of the non-missing values (NaN when there are none).
pub fn median(data: &[f64]) -> f64 {
    quantile(data, 0.5).unwrap_or(f64::NAN)
}

/// First and third quartile of a dataset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    /// 25th percentile
    pub q1: f64,
    /// 75th percentile
    pub q3: f64,
}

impl Quartiles {
    /// Compute quartiles over the non-missing values.
    pub fn from_data(data: &[f64]) -> Option<Self> {
        let mut sorted = finite_values(data);
        sorted.sort_by(f64::total_cmp);

        Some(Self {
            q1: quantile_sorted(&sorted, 0.25)?,
            q3: quantile_sorted(&sorted, 0.75)?,
        })
    }

    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Tukey fences at `multiplier` IQRs beyond the quartiles
    pub fn fences(&self, multiplier: f64) -> Fences {
        let iqr = self.iqr();
        Fences {
            lower: self.q1 - multiplier * iqr,
            upper: self.q3 + multiplier * iqr,
        }
    }
}

/// Outlier bounds derived from quartiles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fences {
    pub lower: f64,
    pub upper: f64,
}

impl Fences {
    /// Check if a value lies outside the fences
    pub fn excludes(&self, x: f64) -> bool {
        x < self.lower || x > self.upper
    }
}

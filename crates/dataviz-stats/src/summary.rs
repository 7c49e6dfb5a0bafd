//! Summary statistics for a numeric sequence
//!
//! Provides the statistics the highlight detectors need:
//! - Mean, population variance, standard deviation
//! - Global min/max together with the first index where each occurs

use serde::{Deserialize, Serialize};

/// Returns true if a value counts as missing.
#[inline]
pub fn is_missing(x: f64) -> bool {
    !x.is_finite()
}

/// Collect the non-missing values of a sequence, preserving order.
pub fn finite_values(data: &[f64]) -> Vec<f64> {
    data.iter().copied().filter(|x| x.is_finite()).collect()
}

/// Summary statistics for a numeric sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of non-missing values
    pub count: usize,
    /// Number of missing values
    pub missing: usize,
    /// Mean (average)
    pub mean: f64,
    /// Population variance (divides by `count`)
    pub variance: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// First index holding `min`
    pub argmin: Option<usize>,
    /// First index holding `max`
    pub argmax: Option<usize>,
}

impl SummaryStats {
    /// Compute summary statistics from data
    pub fn from_data(data: &[f64]) -> Self {
        let finite = finite_values(data);
        let missing = data.len() - finite.len();

        if finite.is_empty() {
            return Self::empty(missing);
        }

        let count = finite.len();
        let mean = finite.iter().sum::<f64>() / count as f64;
        let variance = finite.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count as f64;

        // Strict comparisons keep the earliest index on ties.
        let mut argmin = None;
        let mut argmax = None;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (i, &x) in data.iter().enumerate() {
            if is_missing(x) {
                continue;
            }
            if argmin.is_none() || x < min {
                min = x;
                argmin = Some(i);
            }
            if argmax.is_none() || x > max {
                max = x;
                argmax = Some(i);
            }
        }

        Self {
            count,
            missing,
            mean,
            variance,
            std_dev: variance.sqrt(),
            min,
            max,
            argmin,
            argmax,
        }
    }

    /// Create empty statistics (all NaN)
    fn empty(missing: usize) -> Self {
        Self {
            count: 0,
            missing,
            mean: f64::NAN,
            variance: f64::NAN,
            std_dev: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            argmin: None,
            argmax: None,
        }
    }

    /// True when there is nothing to summarize
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Compute z-score for a value
    ///
    /// Returns NaN when the standard deviation is zero or undefined.
    pub fn zscore(&self, x: f64) -> f64 {
        if self.std_dev == 0.0 || self.std_dev.is_nan() {
            return f64::NAN;
        }
        (x - self.mean) / self.std_dev
    }
}

/// Round to a fixed number of decimal places (half away from zero).
pub fn round_to(x: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (x * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_stats_basic() {
        let data: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let stats = SummaryStats::from_data(&data);

        assert_eq!(stats.count, 10);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 10.0);
        assert!((stats.mean - 5.5).abs() < 1e-10);
        assert!((stats.variance - 8.25).abs() < 1e-10);
    }

    #[test]
    fn test_summary_stats_with_nan() {
        let data = vec![1.0, 2.0, f64::NAN, 4.0, 5.0];
        let stats = SummaryStats::from_data(&data);

        assert_eq!(stats.count, 4);
        assert_eq!(stats.missing, 1);
        assert_eq!(stats.argmin, Some(0));
        assert_eq!(stats.argmax, Some(4));
    }

    #[test]
    fn test_extremes_keep_first_index() {
        let data = vec![f64::NAN, 3.0, 1.0, 3.0, 1.0];
        let stats = SummaryStats::from_data(&data);

        assert_eq!(stats.argmax, Some(1));
        assert_eq!(stats.argmin, Some(2));
    }

    #[test]
    fn test_all_missing() {
        let stats = SummaryStats::from_data(&[f64::NAN, f64::INFINITY]);
        assert!(stats.is_empty());
        assert_eq!(stats.missing, 2);
        assert_eq!(stats.argmax, None);
    }

    #[test]
    fn test_zscore_zero_variance() {
        let stats = SummaryStats::from_data(&[4.0, 4.0, 4.0]);
        assert_eq!(stats.std_dev, 0.0);
        assert!(stats.zscore(4.0).is_nan());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(2.345_6, 2), 2.35);
        assert_eq!(round_to(-1.004, 2), -1.0);
    }
}

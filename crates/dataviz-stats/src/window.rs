//! Window statistics for mean-shift tests
//!
//! A [`WindowStats`] summarizes one side of a sliding two-window
//! comparison. Two windows combine into a pooled standard deviation
//! weighted by their sizes.

use crate::summary::is_missing;

/// Count, mean, population variance and extremes of the non-missing values
/// in a window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub count: usize,
    pub mean: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
}

impl WindowStats {
    /// Summarize a window, skipping missing values.
    pub fn from_slice(window: &[f64]) -> Self {
        let (count, sum, min, max) = window.iter().filter(|x| !is_missing(**x)).fold(
            (0usize, 0.0, f64::INFINITY, f64::NEG_INFINITY),
            |(n, s, lo, hi), &x| (n + 1, s + x, lo.min(x), hi.max(x)),
        );

        if count == 0 {
            return Self {
                count: 0,
                mean: f64::NAN,
                variance: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
            };
        }

        let mean = sum / count as f64;
        let variance = window
            .iter()
            .filter(|x| !is_missing(**x))
            .map(|x| (x - mean).powi(2))
            .sum::<f64>()
            / count as f64;

        Self {
            count,
            mean,
            variance,
            min,
            max,
        }
    }

    /// True when every non-missing value in the window is the same
    pub fn is_constant(&self) -> bool {
        self.count > 0 && self.min == self.max
    }
}

/// Pooled standard deviation of two windows
///
/// `sqrt((var_a * n_a + var_b * n_b) / (n_a + n_b))`
pub fn pooled_std(a: &WindowStats, b: &WindowStats) -> f64 {
    let total = (a.count + b.count) as f64;
    if total == 0.0 {
        return f64::NAN;
    }
    ((a.variance * a.count as f64 + b.variance * b.count as f64) / total).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_stats_skip_missing() {
        let w = WindowStats::from_slice(&[1.0, f64::NAN, 3.0]);
        assert_eq!(w.count, 2);
        assert_eq!(w.mean, 2.0);
        assert_eq!(w.variance, 1.0);
    }

    #[test]
    fn test_empty_window() {
        let w = WindowStats::from_slice(&[f64::NAN]);
        assert_eq!(w.count, 0);
        assert!(w.mean.is_nan());
        assert!(!w.is_constant());
    }

    #[test]
    fn test_constant_window() {
        let w = WindowStats::from_slice(&[0.1, f64::NAN, 0.1, 0.1]);
        assert!(w.is_constant());
        assert_eq!((w.min, w.max), (0.1, 0.1));
        assert!(!WindowStats::from_slice(&[0.1, 0.2]).is_constant());
    }

    #[test]
    fn test_pooled_std_equal_windows() {
        let a = WindowStats::from_slice(&[0.0, 2.0]);
        let b = WindowStats::from_slice(&[10.0, 12.0]);
        assert!((pooled_std(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pooled_std_weights_by_size() {
        let a = WindowStats::from_slice(&[0.0, 2.0, 0.0, 2.0]);
        let b = WindowStats::from_slice(&[5.0, 5.0]);
        // (1.0 * 4 + 0.0 * 2) / 6
        assert!((pooled_std(&a, &b) - (4.0f64 / 6.0).sqrt()).abs() < 1e-12);
    }
}

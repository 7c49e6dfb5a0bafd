use dataviz_stats::{is_missing, round_to, SummaryStats};

use super::{make_highlight, Detector};
use crate::highlight::{Highlight, Method, Severity};

/// Flags values more than `threshold` population standard deviations from the mean
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZScoreDetector {
    pub threshold: f64,
}

impl ZScoreDetector {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Detector for ZScoreDetector {
    fn method(&self) -> Method {
        Method::ZScore
    }

    fn detect(&self, values: &[f64]) -> Vec<Highlight> {
        let stats = SummaryStats::from_data(values);
        // A constant series can still carry rounding noise in its variance.
        if stats.is_empty() || stats.min == stats.max || stats.std_dev == 0.0 {
            return Vec::new();
        }

        values
            .iter()
            .enumerate()
            .filter(|(_, v)| !is_missing(**v))
            .filter_map(|(index, &value)| {
                let z = stats.zscore(value);
                if z.abs() <= self.threshold {
                    return None;
                }
                let severity = if z.abs() > self.threshold + 1.0 {
                    Severity::High
                } else {
                    Severity::Medium
                };
                let direction = if z > 0.0 { "above" } else { "below" };

                let mut highlight = make_highlight(
                    Method::ZScore,
                    index,
                    value,
                    severity,
                    format!("Z-score outlier ({} mean)", direction),
                    format!("z={:.1}", z),
                );
                highlight.z_score = Some(round_to(z, 2));
                Some(highlight)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_sequence_yields_nothing() {
        let detector = ZScoreDetector::new(0.0);
        assert!(detector.detect(&[3.0, 3.0, f64::NAN, 3.0]).is_empty());
        assert!(detector.detect(&[]).is_empty());
        assert!(detector.detect(&[f64::NAN, f64::NAN]).is_empty());
    }

    #[test]
    fn test_constant_with_inexact_mean() {
        // 0.1 has no exact binary form, so the summed mean is off in the last bit.
        let values = vec![0.1; 10];
        assert!(ZScoreDetector::new(0.5).detect(&values).is_empty());
        assert!(ZScoreDetector::new(0.0).detect(&[753.007_474_882_074_8; 7]).is_empty());
    }

    #[test]
    fn test_single_spike() {
        // Population std is 36, so the spike sits at exactly z = 2.0.
        let values = [10.0, 10.0, 10.0, 10.0, 100.0];

        assert!(ZScoreDetector::new(2.5).detect(&values).is_empty());

        let found = ZScoreDetector::new(0.5).detect(&values);
        assert_eq!(found.len(), 1);
        let h = &found[0];
        assert_eq!(h.index, 4);
        assert_eq!(h.severity, Severity::High);
        assert!(h.reason.contains("above mean"));
        assert_eq!(h.label, "z=2.0");
        assert_eq!(h.z_score, Some(2.0));
        assert_eq!(h.suggested_style, "halo_ring");
    }

    #[test]
    fn test_medium_below_mean() {
        let values = [10.0, 10.0, 10.0, 10.0, -80.0];
        let found = ZScoreDetector::new(1.5).detect(&values);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].severity, Severity::Medium);
        assert!(found[0].reason.contains("below mean"));
        assert_eq!(found[0].suggested_style, "color_shift");
        assert_eq!(found[0].z_score, Some(-2.0));
    }

    #[test]
    fn test_missing_values_keep_positions() {
        let values = [f64::NAN, 10.0, 10.0, 10.0, 10.0, 100.0];
        let found = ZScoreDetector::new(0.5).detect(&values);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].index, 5);
    }
}

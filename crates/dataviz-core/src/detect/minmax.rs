use dataviz_stats::SummaryStats;

use super::{make_highlight, Detector};
use crate::highlight::{Highlight, Method, Severity};

/// Marks the global maximum and minimum, each at its first occurrence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinMaxDetector;

impl Detector for MinMaxDetector {
    fn method(&self) -> Method {
        Method::MinMax
    }

    fn detect(&self, values: &[f64]) -> Vec<Highlight> {
        let stats = SummaryStats::from_data(values);
        let mut found = Vec::with_capacity(2);

        if let Some(index) = stats.argmax {
            found.push(make_highlight(
                Method::MinMax,
                index,
                stats.max,
                Severity::Low,
                "Global maximum".to_string(),
                format!("Max: {:.1}", stats.max),
            ));
        }
        if let Some(index) = stats.argmin {
            found.push(make_highlight(
                Method::MinMax,
                index,
                stats.min,
                Severity::Low,
                "Global minimum".to_string(),
                format!("Min: {:.1}", stats.min),
            ));
        }
        found
    }
}

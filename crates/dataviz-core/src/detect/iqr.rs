use dataviz_stats::{is_missing, Quartiles};

use super::{make_highlight, Detector};
use crate::highlight::{Highlight, Method, Severity};

/// Fewest non-missing values the quartiles are computed from
const MIN_VALUES: usize = 4;

/// Flags values outside the Tukey fences `[Q1 - m*IQR, Q3 + m*IQR]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrDetector {
    pub multiplier: f64,
}

impl IqrDetector {
    pub fn new(multiplier: f64) -> Self {
        Self { multiplier }
    }
}

impl Detector for IqrDetector {
    fn method(&self) -> Method {
        Method::Iqr
    }

    fn detect(&self, values: &[f64]) -> Vec<Highlight> {
        let present = values.iter().filter(|v| !is_missing(**v)).count();
        if present < MIN_VALUES {
            return Vec::new();
        }
        let Some(quartiles) = Quartiles::from_data(values) else {
            return Vec::new();
        };
        let iqr = quartiles.iqr();
        if iqr == 0.0 {
            return Vec::new();
        }
        let fences = quartiles.fences(self.multiplier);

        values
            .iter()
            .enumerate()
            .filter(|(_, v)| !is_missing(**v) && fences.excludes(**v))
            .map(|(index, &value)| {
                let (beyond, reason) = if value > fences.upper {
                    (value - fences.upper, "IQR outlier (above Q3)")
                } else {
                    (fences.lower - value, "IQR outlier (below Q1)")
                };
                let severity = if beyond / iqr > 1.0 {
                    Severity::High
                } else {
                    Severity::Medium
                };
                make_highlight(
                    Method::Iqr,
                    index,
                    value,
                    severity,
                    reason.to_string(),
                    format!("{:.1}", value),
                )
            })
            .collect()
    }
}

use dataviz_stats::{is_missing, pooled_std, round_to, WindowStats};

use super::{make_highlight, Detector};
use crate::highlight::{Highlight, Method, Severity};

/// Flags positions where the mean of the next `window` values departs from
/// the mean of the previous `window` values
///
/// The shift is normalized by the pooled standard deviation of the two
/// windows. One underlying level change usually trips several adjacent
/// positions; all of them are reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangepointDetector {
    pub window: usize,
    pub threshold: f64,
}

impl ChangepointDetector {
    pub fn new(window: usize, threshold: f64) -> Self {
        Self { window, threshold }
    }
}

impl Detector for ChangepointDetector {
    fn method(&self) -> Method {
        Method::Changepoint
    }

    fn detect(&self, values: &[f64]) -> Vec<Highlight> {
        let w = self.window;
        let n = values.len();
        // Needs n >= 2w + 1, written so a huge window cannot overflow.
        if w == 0 || w > n.saturating_sub(1) / 2 {
            return Vec::new();
        }

        let mut found = Vec::new();
        for i in w..n - w {
            let value = values[i];
            if is_missing(value) {
                continue;
            }

            let left = WindowStats::from_slice(&values[i - w..i]);
            let right = WindowStats::from_slice(&values[i + 1..i + 1 + w]);
            if left.count < 2 || right.count < 2 {
                continue;
            }
            if left.is_constant() && right.is_constant() {
                continue;
            }
            let pooled = pooled_std(&left, &right);
            if pooled.is_nan() || pooled <= 0.0 {
                continue;
            }

            let delta = right.mean - left.mean;
            let shift = delta.abs() / pooled;
            if shift <= self.threshold {
                continue;
            }

            let severity = if shift > self.threshold + 1.0 {
                Severity::High
            } else {
                Severity::Medium
            };
            let direction = if delta > 0.0 { "increase" } else { "decrease" };

            let mut highlight = make_highlight(
                Method::Changepoint,
                i,
                value,
                severity,
                format!("Changepoint ({})", direction),
                format!("Shift: {}", direction),
            );
            highlight.shift_magnitude = Some(round_to(shift, 2));
            found.push(highlight);
        }
        found
    }
}

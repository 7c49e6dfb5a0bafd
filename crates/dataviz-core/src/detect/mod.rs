//! Highlight detectors
//!
//! Each detection method is a small struct implementing [`Detector`]. A
//! detector scans one numeric sequence and returns candidate highlights in
//! ascending index order; missing (non-finite) entries are skipped but keep
//! their position.
//!
//! [`run_detectors`] runs the configured methods in order and merges their
//! candidates so that each index carries at most one highlight.

mod changepoint;
mod iqr;
mod minmax;
mod zscore;

pub use changepoint::ChangepointDetector;
pub use iqr::IqrDetector;
pub use minmax::MinMaxDetector;
pub use zscore::ZScoreDetector;

use serde::{Deserialize, Serialize};

use crate::error::{validation, ConfigResult};
use crate::highlight::{Highlight, Method, Severity};
use crate::merge::deduplicate;
use crate::style::StyleToken;

/// Default z-score threshold
pub const DEFAULT_ZSCORE_THRESHOLD: f64 = 2.5;
/// Default Tukey fence multiplier
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;
/// Default changepoint window size
pub const DEFAULT_WINDOW: usize = 5;
/// Default normalized shift threshold
pub const DEFAULT_SHIFT_THRESHOLD: f64 = 2.0;

/// The core trait all detectors implement.
///
/// Detectors are stateless apart from their parameters and never fail:
/// degenerate input yields an empty result.
pub trait Detector: Send + Sync {
    /// Method this detector implements
    fn method(&self) -> Method;

    /// Scan a sequence for notable points
    fn detect(&self, values: &[f64]) -> Vec<Highlight>;
}

/// Parameters for a detection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Methods to run, in order; earlier methods win severity ties
    pub methods: Vec<Method>,
    /// Z-score threshold
    pub threshold: f64,
    /// Tukey fence multiplier
    pub iqr_multiplier: f64,
    /// Changepoint window size
    pub window: usize,
    /// Normalized mean shift threshold
    pub shift_threshold: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            methods: Method::ALL.to_vec(),
            threshold: DEFAULT_ZSCORE_THRESHOLD,
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            window: DEFAULT_WINDOW,
            shift_threshold: DEFAULT_SHIFT_THRESHOLD,
        }
    }
}

impl DetectorConfig {
    /// Restrict the run to the given methods
    pub fn with_methods(mut self, methods: impl Into<Vec<Method>>) -> Self {
        self.methods = methods.into();
        self
    }

    /// Check every parameter before any computation
    pub fn validate(&self) -> ConfigResult<()> {
        validation::non_negative("threshold", self.threshold)?;
        validation::non_negative("iqr_multiplier", self.iqr_multiplier)?;
        validation::at_least_one("window", self.window)?;
        validation::non_negative("shift_threshold", self.shift_threshold)?;
        Ok(())
    }

    /// Build the detector for one method
    pub fn detector(&self, method: Method) -> Box<dyn Detector> {
        match method {
            Method::ZScore => Box::new(ZScoreDetector::new(self.threshold)),
            Method::Iqr => Box::new(IqrDetector::new(self.iqr_multiplier)),
            Method::MinMax => Box::new(MinMaxDetector),
            Method::Changepoint => {
                Box::new(ChangepointDetector::new(self.window, self.shift_threshold))
            }
        }
    }

    /// Build the configured detectors in run order
    pub fn detectors(&self) -> Vec<Box<dyn Detector>> {
        self.methods.iter().map(|m| self.detector(*m)).collect()
    }
}

/// Outcome of a detection run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetectionReport {
    /// Merged highlights, one per index, ascending
    pub highlights: Vec<Highlight>,
    /// Candidate count per method before merging, in run order
    pub candidates: Vec<(Method, usize)>,
}

/// Run the configured detectors over a sequence and merge the results
pub fn run_detectors(values: &[f64], config: &DetectorConfig) -> ConfigResult<DetectionReport> {
    config.validate()?;

    let mut all = Vec::new();
    let mut candidates = Vec::with_capacity(config.methods.len());
    for detector in config.detectors() {
        let found = detector.detect(values);
        tracing::debug!("{}: found {} highlight(s)", detector.method(), found.len());
        candidates.push((detector.method(), found.len()));
        all.extend(found);
    }

    let highlights = deduplicate(all);
    tracing::debug!(count = highlights.len(), "highlights after merge");
    Ok(DetectionReport {
        highlights,
        candidates,
    })
}

/// Assemble a highlight with the style a method suggests for its severity
pub(crate) fn make_highlight(
    method: Method,
    index: usize,
    value: f64,
    severity: Severity,
    reason: String,
    label: String,
) -> Highlight {
    Highlight {
        index,
        value,
        reason,
        method,
        severity,
        label,
        suggested_style: StyleToken::suggested_for(method, severity).to_string(),
        z_score: None,
        shift_magnitude: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DetectorConfig::default();
        assert_eq!(config.methods, Method::ALL.to_vec());
        assert_eq!(config.threshold, 2.5);
        assert_eq!(config.window, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = DetectorConfig {
            window: 0,
            ..Default::default()
        };
        assert!(run_detectors(&[1.0, 2.0], &config).is_err());

        let config = DetectorConfig {
            threshold: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_detectors_follow_method_order() {
        let config = DetectorConfig::default().with_methods([Method::MinMax, Method::ZScore]);
        let methods: Vec<Method> = config.detectors().iter().map(|d| d.method()).collect();
        assert_eq!(methods, vec![Method::MinMax, Method::ZScore]);
    }

    #[test]
    fn test_run_merges_by_severity() {
        // Index 9 is both the maximum (low) and an IQR outlier (high).
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0, 2.0, 1.0, 50.0];
        let config = DetectorConfig::default().with_methods([Method::MinMax, Method::Iqr]);
        let report = run_detectors(&values, &config).unwrap();

        assert_eq!(report.candidates, vec![(Method::MinMax, 2), (Method::Iqr, 1)]);
        let at_nine: Vec<&Highlight> =
            report.highlights.iter().filter(|h| h.index == 9).collect();
        assert_eq!(at_nine.len(), 1);
        assert_eq!(at_nine[0].method, Method::Iqr);
        assert_eq!(at_nine[0].severity, Severity::High);
    }

    #[test]
    fn test_no_methods_no_highlights() {
        let config = DetectorConfig::default().with_methods(Vec::new());
        let report = run_detectors(&[1.0, 100.0], &config).unwrap();
        assert!(report.highlights.is_empty());
        assert!(report.candidates.is_empty());
    }
}

//! Highlight records
//!
//! A [`Highlight`] marks one notable datapoint of a numeric column. It is
//! the contract between the detectors and the rendering side: detectors
//! write a JSON array of highlights, renderers read it back and join it to
//! the reduced table by row index.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{ConfigError, VizResult};

/// Detection method that produced a highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    ZScore,
    Iqr,
    MinMax,
    Changepoint,
}

impl Method {
    /// All methods, in default pipeline order
    pub const ALL: [Method; 4] = [
        Method::ZScore,
        Method::Iqr,
        Method::MinMax,
        Method::Changepoint,
    ];

    /// Get the method name as used on the command line and in JSON
    pub fn name(&self) -> &'static str {
        match self {
            Method::ZScore => "zscore",
            Method::Iqr => "iqr",
            Method::MinMax => "minmax",
            Method::Changepoint => "changepoint",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownMethod(s.to_string()))
    }
}

/// Ordinal importance of a highlight
///
/// Variant order gives `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A notable datapoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    /// Position in the source sequence
    pub index: usize,
    /// Value at that position
    pub value: f64,
    /// Human-readable cause
    pub reason: String,
    /// Detector that produced the record
    pub method: Method,
    pub severity: Severity,
    /// Short display text
    pub label: String,
    /// Style token understood by the style contract
    pub suggested_style: String,
    /// Z-score, rounded to 2 decimals (z-score detector only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_score: Option<f64>,
    /// Normalized mean shift, rounded to 2 decimals (changepoint detector only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_magnitude: Option<f64>,
}

/// Read a highlights JSON array from disk
pub fn load_highlights(path: impl AsRef<Path>) -> VizResult<Vec<Highlight>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(dataviz_io::IoError::FileNotFound(path.display().to_string()).into());
    }
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Render highlights as pretty-printed JSON
pub fn highlights_to_json(highlights: &[Highlight]) -> VizResult<String> {
    Ok(serde_json::to_string_pretty(highlights)?)
}

/// Write highlights to disk, creating parent directories as needed
pub fn write_highlights(path: impl AsRef<Path>, highlights: &[Highlight]) -> VizResult<()> {
    let path = path.as_ref();
    let contents = highlights_to_json(highlights)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}

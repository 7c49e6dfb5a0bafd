//! Error types for dataviz-core
//!
//! Provides error handling for:
//! - Dataset validation (missing or unusable columns)
//! - Configuration of detectors, reduction stages and the style contract
//! - Reading and writing artifacts

use dataviz_io::IoError;
use thiserror::Error;

/// Main error type for dataviz operations
#[derive(Error, Debug)]
pub enum VizError {
    /// Dataset validation errors
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Table loading or writing errors
    #[error(transparent)]
    Table(#[from] IoError),

    /// Highlight or style file (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to the columns of a dataset
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    /// Referenced column does not exist
    #[error("Column '{column}' not found. Available: {available:?}")]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    /// No column was named and none is numeric
    #[error("No numeric columns found in data.")]
    NoNumericColumns,

    /// Column exists but does not hold numbers
    #[error("Column '{column}' is not numeric")]
    NonNumericColumn { column: String },
}

impl DatasetError {
    /// Build a `ColumnNotFound` listing the table's columns
    pub fn column_not_found(column: &str, available: &[&str]) -> Self {
        DatasetError::ColumnNotFound {
            column: column.to_string(),
            available: available.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Errors related to configuration values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Numeric parameter outside its valid range
    #[error("{name} must be {requirement}, got {value}")]
    OutOfRange {
        name: &'static str,
        requirement: &'static str,
        value: String,
    },

    /// A stage needs a parameter that was not supplied
    #[error("{stage} requires {parameter}")]
    MissingParameter {
        stage: &'static str,
        parameter: &'static str,
    },

    /// Unknown detection method name
    #[error("Unknown detection method '{0}' (expected zscore, iqr, minmax or changepoint)")]
    UnknownMethod(String),

    /// Unknown style token
    #[error("Unknown style '{0}'")]
    UnknownStyle(String),

    /// Unknown sort order
    #[error("Unknown sort order '{0}' (expected asc or desc)")]
    UnknownSortOrder(String),

    /// Invalid hex color
    #[error("Invalid color '{0}' (expected #RRGGBB or #RRGGBBAA)")]
    InvalidColor(String),

    /// Style file could not be interpreted
    #[error("Invalid style file: {0}")]
    StyleFile(String),
}

/// Result type alias for dataviz operations
pub type VizResult<T> = Result<T, VizError>;

/// Result type alias for dataset validation
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Result type alias for configuration validation
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Validation utilities
pub mod validation {
    use super::*;

    /// Validate that a float parameter is finite and not negative
    pub fn non_negative(name: &'static str, value: f64) -> ConfigResult<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::OutOfRange {
                name,
                requirement: "a finite number >= 0",
                value: value.to_string(),
            });
        }
        Ok(())
    }

    /// Validate that a count parameter is at least one
    pub fn at_least_one(name: &'static str, value: usize) -> ConfigResult<()> {
        if value == 0 {
            return Err(ConfigError::OutOfRange {
                name,
                requirement: "at least 1",
                value: value.to_string(),
            });
        }
        Ok(())
    }
}

//! CLI error types

use dataviz_core::{ConfigError, DatasetError, IoError, VizError};
use thiserror::Error;

/// CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Viz(#[from] VizError),

    #[error(transparent)]
    Usage(#[from] clap::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

// Lower-level errors reach the CLI through `VizError`
impl From<DatasetError> for CliError {
    fn from(err: DatasetError) -> Self {
        CliError::Viz(err.into())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Viz(err.into())
    }
}

impl From<IoError> for CliError {
    fn from(err: IoError) -> Self {
        CliError::Viz(err.into())
    }
}

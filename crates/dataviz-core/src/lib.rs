//! dataviz-core - Highlight detection and data reduction for charts
//!
//! This crate is the analytical core of the dataviz charting toolkit. It
//! finds the datapoints worth pointing at in a chart and shrinks large
//! tables into something a chart can show.
//!
//! # Key Components
//!
//! - **Detectors**: z-score, IQR, min/max and changepoint detection over one
//!   numeric column, merged so each row carries at most one [`Highlight`]
//! - **Reduction**: aggregate, sort, rank-limit and category collapse
//! - **Style contract**: maps the style token of each highlight to drawing
//!   parameters, with JSON or TOML overrides
//! - **Overlays**: joins highlights to a reduced table for a renderer
//!
//! # Example
//!
//! ```
//! use dataviz_core::{run_detectors, DetectorConfig, Method};
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0, 2.0, 1.0, 50.0];
//! let config = DetectorConfig::default().with_methods([Method::Iqr]);
//! let report = run_detectors(&values, &config).unwrap();
//! assert_eq!(report.highlights[0].index, 9);
//! ```

pub mod color;
pub mod dataset;
pub mod detect;
pub mod error;
pub mod highlight;
pub mod merge;
pub mod overlay;
pub mod reduce;
pub mod style;

pub use color::Color;
pub use dataset::{require_columns, select_target_column, TargetColumn};
pub use detect::{run_detectors, DetectionReport, Detector, DetectorConfig};
pub use error::*;
pub use highlight::*;
pub use merge::deduplicate;
pub use overlay::{plan_overlays, OverlayInstruction};
pub use reduce::{reduce, Reduction, ReductionConfig, SortOrder};
pub use style::{StyleCategory, StyleContract, StylePrimitive, StyleSpec, StyleToken};

// Re-export the table model so callers need only this crate
pub use dataviz_io::{read_table, write_table, Column, DataColumn, IoError, Table};
pub use dataviz_stats::Aggregation;

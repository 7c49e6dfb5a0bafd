//! dataviz-stats - Statistical kernels for chart highlighting and reduction
//!
//! Every function in this crate treats non-finite entries (NaN, ±inf) as
//! missing: they are skipped when computing a statistic but keep their
//! position in the input.
//!
//! - **Summary**: mean, population variance, extremes with first-occurrence index
//! - **Quantile**: linear-interpolation percentiles and quartile fences
//! - **Window**: two-sample window statistics and pooled standard deviation
//! - **Aggregate**: group aggregation kernels (mean, sum, median, count, min, max)

pub mod aggregate;
pub mod quantile;
pub mod summary;
pub mod window;

pub use aggregate::*;
pub use quantile::*;
pub use summary::*;
pub use window::*;

//! dataviz-io - Tabular data I/O for chart preparation
//!
//! This crate provides the table model shared by the detection and
//! reduction pipelines, plus readers and a writer for common formats:
//!
//! - **CSV/TSV**: comma or tab separated values with type inference
//! - **JSON**: an array of records, or an object of column arrays
//!
//! # Design
//!
//! All readers implement the `TableReader` trait for uniform access and
//! preserve source row and column order. Columns are either numeric
//! (missing cells become NaN) or text.

pub mod reader;
pub mod table;
pub mod writer;

#[cfg(feature = "csv")]
pub mod csv_reader;

pub mod json_reader;

pub use reader::*;
pub use table::*;
pub use writer::*;

//! dataviz CLI - Command-line interface for chart preparation
//!
//! Subcommands:
//! - `detect`: find highlights in a numeric column and write them as JSON
//! - `reduce`: aggregate, sort, rank-limit and collapse a table
//! - `overlay`: join highlights to a table and resolve their styles
//! - `styles`: print the effective highlight style contract

use clap::{Args, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dataviz_core::detect::{
    DEFAULT_IQR_MULTIPLIER, DEFAULT_SHIFT_THRESHOLD, DEFAULT_WINDOW, DEFAULT_ZSCORE_THRESHOLD,
};
use dataviz_core::{Aggregation, Method, SortOrder};

mod commands;
mod error;

pub use error::{CliError, CliResult};

/// dataviz CLI application
#[derive(Parser, Debug)]
#[command(name = "dataviz")]
#[command(about = "Highlight detection and data reduction for charts", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Detect notable datapoints in one numeric column
    Detect(DetectArgs),

    /// Reduce a table for presentation
    Reduce(ReduceArgs),

    /// Plan highlight overlays for a table
    Overlay(OverlayArgs),

    /// Print the highlight style contract
    Styles(StylesArgs),
}

#[derive(Args, Debug)]
pub(crate) struct DetectArgs {
    /// Input table (.csv, .tsv, .txt or .json)
    input: PathBuf,

    /// Output highlights JSON
    output: PathBuf,

    /// Column to analyze (default: first numeric column)
    #[arg(long)]
    column: Option<String>,

    /// Detection methods to run, in order (default: all)
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    methods: Vec<Method>,

    /// Z-score threshold
    #[arg(long, default_value_t = DEFAULT_ZSCORE_THRESHOLD)]
    threshold: f64,

    /// IQR fence multiplier
    #[arg(long, default_value_t = DEFAULT_IQR_MULTIPLIER)]
    iqr_multiplier: f64,

    /// Changepoint window size
    #[arg(long, default_value_t = DEFAULT_WINDOW)]
    window: usize,

    /// Changepoint shift threshold
    #[arg(long, default_value_t = DEFAULT_SHIFT_THRESHOLD)]
    shift_threshold: f64,
}

#[derive(Args, Debug)]
pub(crate) struct ReduceArgs {
    /// Input table
    input: PathBuf,

    /// Output table (.csv, .tsv or .json)
    output: PathBuf,

    /// Category column
    #[arg(long)]
    x: Option<String>,

    /// Value columns, comma separated; the first is the primary one
    #[arg(long, value_delimiter = ',')]
    y: Vec<String>,

    /// Column to group by
    #[arg(long)]
    groupby: Option<String>,

    /// Aggregation for grouped columns (mean, sum, median, count, min, max)
    #[arg(long)]
    agg: Option<Aggregation>,

    /// Column to sort by (default: primary y column)
    #[arg(long)]
    sort_by: Option<String>,

    /// Sort order (asc or desc)
    #[arg(long, default_value = "desc")]
    sort_order: SortOrder,

    /// Keep the N largest rows
    #[arg(long)]
    top: Option<usize>,

    /// Keep the N smallest rows
    #[arg(long)]
    bottom: Option<usize>,

    /// Fold rows beyond this count into "Other"
    #[arg(long)]
    max_categories: Option<usize>,

    /// Limit pie slices, folding the smallest into "Other"
    #[arg(long)]
    max_slices: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct OverlayArgs {
    /// Table being charted
    table: PathBuf,

    /// Highlights JSON produced by `detect`
    highlights: PathBuf,

    /// Output overlay plan JSON
    output: PathBuf,

    /// Category column
    #[arg(long)]
    x: Option<String>,

    /// Value column the highlights refer to
    #[arg(long)]
    y: String,

    /// Style overrides (.json or .toml)
    #[arg(long)]
    styles: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct StylesArgs {
    /// Style overrides (.json or .toml)
    #[arg(long)]
    styles: Option<PathBuf>,

    /// Write to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Run using the current process arguments.
pub fn run() -> CliResult<()> {
    run_with_args(std::env::args_os())
}

/// Run using the provided argument iterator.
pub fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;

    // Initialize tracing; a subscriber may already be installed
    let filter = if cli.verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .try_init();

    match cli.command {
        Commands::Detect(args) => commands::detect(args),
        Commands::Reduce(args) => commands::reduce(args),
        Commands::Overlay(args) => commands::overlay(args),
        Commands::Styles(args) => commands::styles(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_detect_defaults() {
        let cli = Cli::parse_from(["dataviz", "detect", "in.csv", "out.json"]);
        let Commands::Detect(args) = cli.command else {
            panic!("expected detect");
        };
        assert!(args.methods.is_empty());
        assert_eq!(args.threshold, 2.5);
        assert_eq!(args.window, 5);
    }

    #[test]
    fn test_method_list() {
        let cli = Cli::parse_from([
            "dataviz", "detect", "in.csv", "out.json", "--methods", "iqr,minmax",
        ]);
        let Commands::Detect(args) = cli.command else {
            panic!("expected detect");
        };
        assert_eq!(args.methods, vec![Method::Iqr, Method::MinMax]);
    }

    #[test]
    fn test_reduce_options() {
        let cli = Cli::parse_from([
            "dataviz", "-v", "reduce", "in.csv", "out.csv", "--y", "sales,cost", "--agg", "sum",
            "--sort-order", "asc",
        ]);
        assert!(cli.verbose);
        let Commands::Reduce(args) = cli.command else {
            panic!("expected reduce");
        };
        assert_eq!(args.y, vec!["sales", "cost"]);
        assert_eq!(args.agg, Some(Aggregation::Sum));
        assert_eq!(args.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_rejects_bad_sort_order() {
        let err = run_with_args(["dataviz", "reduce", "in.csv", "out.csv", "--sort-order", "up"])
            .unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[test]
    fn test_rejects_unknown_method() {
        assert!(Cli::try_parse_from([
            "dataviz", "detect", "in.csv", "out.json", "--methods", "lof"
        ])
        .is_err());
    }
}

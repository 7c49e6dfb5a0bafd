//! Subcommand implementations
//!
//! Every command validates and computes first, then serializes its output
//! in memory and writes it in one step.

use std::fs;
use std::path::Path;

use dataviz_core::reduce::group_small_slices;
use dataviz_core::{
    load_highlights, plan_overlays, read_table, reduce as reduce_table, run_detectors,
    select_target_column, write_highlights, write_table, DetectorConfig, Method,
    ReductionConfig, StyleContract,
};

use crate::error::{CliError, CliResult};
use crate::{DetectArgs, OverlayArgs, ReduceArgs, StylesArgs};

fn write_output(path: &Path, contents: &str) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}

fn load_contract(styles: Option<&Path>) -> CliResult<StyleContract> {
    match styles {
        Some(path) => Ok(StyleContract::from_file(path)?),
        None => Ok(StyleContract::builtin()),
    }
}

/// Per-method candidate counts worth reporting; silent methods are skipped
fn methods_with_results(
    candidates: &[(Method, usize)],
) -> impl Iterator<Item = &(Method, usize)> + '_ {
    candidates.iter().filter(|(_, count)| *count > 0)
}

pub(crate) fn detect(args: DetectArgs) -> CliResult<()> {
    let methods = if args.methods.is_empty() {
        Method::ALL.to_vec()
    } else {
        args.methods
    };
    let config = DetectorConfig {
        methods,
        threshold: args.threshold,
        iqr_multiplier: args.iqr_multiplier,
        window: args.window,
        shift_threshold: args.shift_threshold,
    };
    config.validate()?;

    let table = read_table(&args.input)?;
    let target = select_target_column(&table, args.column.as_deref())?;

    let report = run_detectors(target.values, &config)?;
    for (method, count) in methods_with_results(&report.candidates) {
        tracing::info!("{}: found {} highlight(s)", method, count);
    }

    write_highlights(&args.output, &report.highlights)?;
    tracing::info!(
        "Wrote {} highlight(s) for column '{}' to {}",
        report.highlights.len(),
        target.name,
        args.output.display()
    );
    Ok(())
}

pub(crate) fn reduce(args: ReduceArgs) -> CliResult<()> {
    if args.max_slices.is_some() && (args.x.is_none() || args.y.is_empty()) {
        return Err(CliError::InvalidArgument(
            "--max-slices requires --x and --y".to_string(),
        ));
    }

    let config = ReductionConfig {
        x: args.x,
        y: args.y,
        group_by: args.groupby,
        agg: args.agg,
        sort_by: args.sort_by,
        sort_order: args.sort_order,
        top: args.top,
        bottom: args.bottom,
        max_categories: args.max_categories,
    };

    let table = read_table(&args.input)?;
    let mut reduction = reduce_table(&table, &config)?;

    if let (Some(max_slices), Some(x), Some(y)) =
        (args.max_slices, config.x.as_deref(), config.primary_y())
    {
        reduction.table = group_small_slices(&reduction.table, x, y, max_slices)?;
        reduction.output_rows = reduction.table.num_rows();
    }

    if reduction.shrank() {
        tracing::info!(
            "Data reduced: {} → {} rows",
            reduction.input_rows,
            reduction.output_rows
        );
    }
    write_table(&reduction.table, &args.output)?;
    Ok(())
}

pub(crate) fn overlay(args: OverlayArgs) -> CliResult<()> {
    let contract = load_contract(args.styles.as_deref())?;
    let table = read_table(&args.table)?;
    let highlights = load_highlights(&args.highlights)?;

    let plan = plan_overlays(&table, &highlights, &contract, args.x.as_deref(), &args.y)?;
    let json = serde_json::to_string_pretty(&plan)?;
    write_output(&args.output, &json)?;
    tracing::info!(
        "Planned {} overlay(s) for {} highlight(s)",
        plan.len(),
        highlights.len()
    );
    Ok(())
}

pub(crate) fn styles(args: StylesArgs) -> CliResult<()> {
    let contract = load_contract(args.styles.as_deref())?;
    let json = serde_json::to_string_pretty(&contract.to_json())?;
    match args.output {
        Some(path) => write_output(&path, &json),
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}

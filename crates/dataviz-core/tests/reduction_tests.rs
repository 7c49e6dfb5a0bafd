//! Reduction pipeline integration tests

use dataviz_core::{
    reduce, Aggregation, Column, DataColumn, ReductionConfig, SortOrder, Table, VizError,
};
use proptest::prelude::*;
use rstest::rstest;

fn categories() -> Table {
    Table::from_columns(vec![
        Column::text("category", ["A", "B", "C", "D", "E"]),
        Column::numeric("value", vec![50.0, 40.0, 30.0, 20.0, 10.0]),
    ])
    .unwrap()
}

fn text_cells(table: &Table, column: &str) -> Vec<String> {
    let data = &table.column(column).unwrap().data;
    (0..table.num_rows())
        .map(|row| data.cell_text(row).unwrap())
        .collect()
}

fn orders() -> Table {
    Table::from_columns(vec![
        Column::text("region", ["west", "east", "west", "north", "east", "south"]),
        Column::text("product", ["pen", "ink", "pad", "pen", "pen", "ink"]),
        Column::numeric("sales", vec![10.0, 25.0, 5.0, 40.0, 15.0, 8.0]),
        Column::numeric("qty", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
    ])
    .unwrap()
}

// === Category Collapse ===

#[rstest]
#[case(2, &["A", "B", "Other"], 60.0)]
#[case(3, &["A", "B", "C", "Other"], 30.0)]
fn test_collapse_keeps_k_plus_other(
    #[case] k: usize,
    #[case] expected: &[&str],
    #[case] other: f64,
) {
    let config = ReductionConfig::new("category", ["value"]).max_categories(k);
    let out = reduce(&categories(), &config).unwrap();

    assert_eq!(out.output_rows, k + 1);
    assert_eq!(text_cells(&out.table, "category"), expected);
    assert_eq!(out.table.numeric_values("value").unwrap()[k], other);
}

#[test]
fn test_collapse_not_needed() {
    let config = ReductionConfig::new("category", ["value"]).max_categories(5);
    let out = reduce(&categories(), &config).unwrap();
    assert_eq!(out.output_rows, 5);
    assert!(!out.shrank());
}

// === Sort and Rank ===

#[rstest]
#[case(SortOrder::Asc, &["E", "D", "C", "B", "A"])]
#[case(SortOrder::Desc, &["A", "B", "C", "D", "E"])]
fn test_sort_order(#[case] order: SortOrder, #[case] expected: &[&str]) {
    let config = ReductionConfig::new("category", ["value"])
        .sort_by("value")
        .sort_order(order);
    let out = reduce(&categories(), &config).unwrap();
    assert_eq!(text_cells(&out.table, "category"), expected);
}

#[test]
fn test_top_and_bottom() {
    let config = ReductionConfig::new("category", ["value"]).top(2).bottom(3);
    let out = reduce(&categories(), &config).unwrap();
    assert_eq!(text_cells(&out.table, "category"), ["A", "B"]);

    let config = ReductionConfig::new("category", ["value"]).bottom(2);
    let out = reduce(&categories(), &config).unwrap();
    assert_eq!(text_cells(&out.table, "category"), ["E", "D"]);
}

#[test]
fn test_top_after_aggregate() {
    let config = ReductionConfig::new("region", ["sales"])
        .group_by("region", Aggregation::Sum)
        .top(2);
    let out = reduce(&orders(), &config).unwrap();

    assert_eq!(out.input_rows, 6);
    assert_eq!(text_cells(&out.table, "region"), ["east", "north"]);
    assert_eq!(out.table.numeric_values("sales").unwrap(), &[40.0, 40.0]);
    assert!(!out.table.has_column("product"));
}

// === Aggregate Rename ===

#[test]
fn test_group_key_renamed_to_requested_x() {
    let config = ReductionConfig::new("area", ["sales"]).group_by("region", Aggregation::Mean);
    let out = reduce(&orders(), &config).unwrap();
    assert_eq!(out.table.column_names(), ["area", "sales", "qty"]);
}

#[test]
fn test_group_key_not_renamed_when_x_exists() {
    let config = ReductionConfig::new("qty", ["sales"]).group_by("region", Aggregation::Mean);
    let out = reduce(&orders(), &config).unwrap();
    assert_eq!(out.table.column_names(), ["region", "sales", "qty"]);
}

#[test]
fn test_aggregate_then_collapse() {
    let config = ReductionConfig::new("region", ["qty"])
        .group_by("region", Aggregation::Count)
        .sort_order(SortOrder::Asc)
        .max_categories(2);
    let out = reduce(&orders(), &config).unwrap();

    // Counts: north 1, south 1, east 2, west 2 (ascending, stable by key)
    assert_eq!(text_cells(&out.table, "region"), ["north", "south", "Other"]);
    assert_eq!(out.table.numeric_values("qty").unwrap(), &[1.0, 1.0, 4.0]);
}

// === Validation ===

#[test]
fn test_unknown_group_by_lists_columns() {
    let config = ReductionConfig::new("region", ["sales"]).group_by("country", Aggregation::Sum);
    let err = reduce(&orders(), &config).unwrap_err();
    assert!(matches!(err, VizError::Dataset(_)));
    let message = err.to_string();
    assert!(message.contains("'country'"));
    assert!(message.contains("region") && message.contains("qty"));
}

#[test]
fn test_rank_on_text_column_fails() {
    let config = ReductionConfig::new("region", ["sales"])
        .sort_by("product")
        .top(2);
    assert!(reduce(&orders(), &config).is_err());
}

#[test]
fn test_empty_table_passes_through() {
    let empty = Table::from_columns(vec![
        Column::text("category", Vec::<String>::new()),
        Column::new("value", DataColumn::Numeric(Vec::new())),
    ])
    .unwrap();
    let config = ReductionConfig::new("category", ["value"])
        .group_by("category", Aggregation::Sum)
        .top(3)
        .max_categories(2);
    let out = reduce(&empty, &config).unwrap();
    assert_eq!(out.output_rows, 0);
}

// === Property-Based Tests ===

fn numeric_table(values: Vec<f64>) -> Table {
    let names: Vec<String> = (0..values.len()).map(|i| format!("c{}", i)).collect();
    Table::from_columns(vec![
        Column::text("name", names),
        Column::numeric("value", values),
    ])
    .unwrap()
}

proptest! {
    #[test]
    fn test_top_n_sorted_descending(values in prop::collection::vec(-1e6f64..1e6, 0..40), n in 1usize..20) {
        let table = numeric_table(values.clone());
        let config = ReductionConfig::new("name", ["value"]).top(n);
        let out = reduce(&table, &config).unwrap();

        prop_assert_eq!(out.output_rows, n.min(values.len()));
        let kept = out.table.numeric_values("value").unwrap();
        prop_assert!(kept.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_collapse_other_is_sum_of_rest(values in prop::collection::vec(0.0f64..1e3, 1..40), k in 1usize..20) {
        let table = numeric_table(values.clone());
        let config = ReductionConfig::new("name", ["value"])
            .sort_by("value")
            .max_categories(k);
        let out = reduce(&table, &config).unwrap();

        if values.len() > k {
            prop_assert_eq!(out.output_rows, k + 1);
            let mut sorted = values.clone();
            sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
            let rest: f64 = sorted[k..].iter().sum();
            let other = out.table.numeric_values("value").unwrap()[k];
            prop_assert!((other - rest).abs() <= 1e-9 * rest.max(1.0));
        } else {
            prop_assert_eq!(out.output_rows, values.len());
        }
    }
}

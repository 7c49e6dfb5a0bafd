//! Overlay planning
//!
//! Joins highlights to the table being drawn and resolves their style
//! tokens, producing one [`OverlayInstruction`] per primitive a renderer
//! has to draw. Drawing itself happens elsewhere.

use serde::Serialize;

use dataviz_io::{DataColumn, Table};
use dataviz_stats::is_missing;

use crate::error::{DatasetError, VizResult};
use crate::highlight::{Highlight, Method, Severity};
use crate::style::{StyleContract, StyleSpec, StyleToken};

/// One primitive to draw over a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayInstruction {
    /// Row of the highlighted point
    pub index: usize,
    /// Horizontal position: the x value when numeric, otherwise the row index
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub method: Method,
    pub severity: Severity,
    pub token: StyleToken,
    #[serde(flatten)]
    pub style: StyleSpec,
    /// Horizontal extent of a shaded band
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<[f64; 2]>,
}

/// Plan the overlays for a set of highlights
///
/// Highlights pointing past the end of the table are skipped. An empty
/// label falls back to the y value.
pub fn plan_overlays(
    table: &Table,
    highlights: &[Highlight],
    contract: &StyleContract,
    x_column: Option<&str>,
    y_column: &str,
) -> VizResult<Vec<OverlayInstruction>> {
    let y_col = table
        .column(y_column)
        .ok_or_else(|| DatasetError::column_not_found(y_column, &table.column_names()))?;
    let y_values = y_col
        .data
        .as_numeric()
        .ok_or_else(|| DatasetError::NonNumericColumn {
            column: y_column.to_string(),
        })?;
    let x_data: Option<&DataColumn> = match x_column {
        Some(name) => Some(
            &table
                .column(name)
                .ok_or_else(|| DatasetError::column_not_found(name, &table.column_names()))?
                .data,
        ),
        None => None,
    };

    let mut plan = Vec::new();
    for highlight in highlights {
        let index = highlight.index;
        if index >= table.num_rows() {
            tracing::debug!(index, rows = table.num_rows(), "highlight outside table");
            continue;
        }

        let x = match x_data.and_then(DataColumn::as_numeric) {
            Some(values) if !is_missing(values[index]) => values[index],
            _ => index as f64,
        };
        let y = if is_missing(y_values[index]) {
            highlight.value
        } else {
            y_values[index]
        };
        let label = if highlight.label.is_empty() {
            y_col.data.cell_text(index).unwrap_or_default()
        } else {
            highlight.label.clone()
        };

        for (token, spec) in contract.resolve(&highlight.suggested_style) {
            let band = match token {
                StyleToken::BandShade => {
                    let half = f64::from(spec.width.unwrap_or(0.5)) / 2.0;
                    Some([x - half, x + half])
                }
                _ => None,
            };
            plan.push(OverlayInstruction {
                index,
                x,
                y,
                label: label.clone(),
                method: highlight.method,
                severity: highlight.severity,
                token,
                style: spec.clone(),
                band,
            });
        }
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataviz_io::Column;

    fn table() -> Table {
        Table::from_columns(vec![
            Column::text("month", ["jan", "feb", "mar"]),
            Column::numeric("day", vec![1.0, 32.0, 60.0]),
            Column::numeric("sales", vec![5.0, 50.0, 7.5]),
        ])
        .unwrap()
    }

    fn highlight(index: usize, style: &str, label: &str) -> Highlight {
        Highlight {
            index,
            value: 0.0,
            reason: String::new(),
            method: Method::ZScore,
            severity: Severity::High,
            label: label.to_string(),
            suggested_style: style.to_string(),
            z_score: None,
            shift_magnitude: None,
        }
    }

    #[test]
    fn test_text_x_uses_row_index() {
        let contract = StyleContract::builtin();
        let plan = plan_overlays(
            &table(),
            &[highlight(1, "halo_ring", "z=2.0")],
            &contract,
            Some("month"),
            "sales",
        )
        .unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].x, 1.0);
        assert_eq!(plan[0].y, 50.0);
        assert_eq!(plan[0].token, StyleToken::HaloRing);
    }

    #[test]
    fn test_band_extent_and_label_fallback() {
        let contract = StyleContract::builtin();
        let plan = plan_overlays(
            &table(),
            &[highlight(2, "band_shade", "")],
            &contract,
            Some("day"),
            "sales",
        )
        .unwrap();
        assert_eq!(plan[0].x, 60.0);
        assert_eq!(plan[0].band, Some([59.75, 60.25]));
        assert_eq!(plan[0].label, "7.5");
    }

    #[test]
    fn test_combo_expands_and_out_of_range_skipped() {
        let contract = StyleContract::builtin();
        let plan = plan_overlays(
            &table(),
            &[highlight(0, "combo", "Max"), highlight(9, "glow", "far")],
            &contract,
            None,
            "sales",
        )
        .unwrap();
        let tokens: Vec<StyleToken> = plan.iter().map(|p| p.token).collect();
        assert_eq!(tokens, vec![StyleToken::ColorShift, StyleToken::AnnotationArrow]);
        assert!(plan.iter().all(|p| p.index == 0));
    }

    #[test]
    fn test_requires_numeric_y() {
        let contract = StyleContract::builtin();
        assert!(plan_overlays(&table(), &[], &contract, None, "month").is_err());
        assert!(plan_overlays(&table(), &[], &contract, Some("week"), "sales").is_err());
    }

    #[test]
    fn test_serialized_shape() {
        let contract = StyleContract::builtin();
        let plan =
            plan_overlays(&table(), &[highlight(1, "band_shade", "x")], &contract, None, "sales")
                .unwrap();
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json[0]["token"], "band_shade");
        assert_eq!(json[0]["primitive"], "vertical_band");
        assert_eq!(json[0]["color"], "#D55E00");
        assert_eq!(json[0]["band"][0], 0.75);
    }
}

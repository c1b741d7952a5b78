//! FILENAME: chart-engine/src/view.rs
//! Chart models - the renderable output.
//!
//! These are the value objects handed to the presentation layer. They
//! carry display flags rather than behavior; a suppressed chart is
//! represented by the absence of a model, never by a degenerate one.

use serde::{Deserialize, Serialize};

/// One matrix cell: a rounded percentage paired with the count behind it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentageTotal {
    pub percentage: f64,
    pub total: i64,
}

/// Single-dimension chart: one total per category label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChartModel {
    pub title: String,
    pub headers: Vec<String>,
    pub labels: Vec<String>,
    pub data: Vec<i64>,
    pub total: i64,
    pub show_chart: bool,
}

/// Category × attribute chart: per-series rows of percentage/total cells,
/// with an optional per-category totals row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageTotalBarChartModel {
    pub title: String,
    pub headers: Vec<String>,

    /// Category labels, one per matrix column.
    pub labels: Vec<String>,

    /// Series names, one per matrix row.
    pub series: Vec<String>,

    /// Row-major matrix: `data[series][label]`.
    pub data: Vec<Vec<PercentageTotal>>,

    /// Per-category share of the grand total, in label order.
    pub totals: Option<Vec<PercentageTotal>>,

    /// Display title for the totals row.
    pub total_row_title: Option<String>,

    pub show_chart: bool,
    pub show_percentage: bool,
    pub hide_total: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_model_serializes_with_plain_field_names() {
        let model = PieChartModel {
            title: "Performance Level".to_string(),
            headers: vec![
                "".to_string(),
                "Performance Level".to_string(),
                "Performance Count".to_string(),
            ],
            labels: vec!["Basic".to_string(), "Proficient".to_string()],
            data: vec![3, 7],
            total: 10,
            show_chart: true,
        };

        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["title"], "Performance Level");
        assert_eq!(json["show_chart"], true);
        assert_eq!(json["data"][1], 7);
    }

    #[test]
    fn test_percentage_total_round_trips() {
        let cell = PercentageTotal {
            percentage: 33.33,
            total: 1,
        };
        let json = serde_json::to_string(&cell).unwrap();
        let back: PercentageTotal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cell);
    }
}

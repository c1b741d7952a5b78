//! FILENAME: chart-engine/src/pivot.rs
//! Pivot table building and percentage arithmetic.
//!
//! Turns aggregated cells into an ordered matrix: rows are attribute
//! values, columns are categories, both sorted ascending by `GroupValue`
//! ordering. Absent cells are defined zeros; no row or column is omitted
//! even when entirely zero.

use rustc_hash::FxHashMap;

use crate::aggregate::{AggregateCell, GroupValue};
use crate::view::PercentageTotal;

/// Rounded percentage of a subtotal against a total.
/// Zero when the total or the subtotal is zero, never NaN.
pub fn percentage(subtotal: i64, total: i64) -> f64 {
    if total == 0 || subtotal == 0 {
        return 0.0;
    }
    round2(100.0 * subtotal as f64 / total as f64)
}

/// Half-away-from-zero rounding to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The ordered category × attribute matrix with its marginal totals.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable {
    /// `["", attribute_header, category1, category2, ...]`
    pub headers: Vec<String>,

    /// Distinct categories, sorted ascending (matrix columns).
    pub categories: Vec<GroupValue>,

    /// Distinct attribute values, sorted ascending (matrix rows).
    pub attributes: Vec<GroupValue>,

    /// `rows[attribute][category]`; percentage is of the row subtotal.
    pub rows: Vec<Vec<PercentageTotal>>,

    /// Per-attribute-row sum across categories.
    pub row_subtotals: Vec<i64>,

    /// Per-category sum across attribute rows.
    pub column_totals: Vec<i64>,

    /// Sum of every cell.
    pub grand_total: i64,
}

/// Builds the pivot matrix from two-dimensional aggregate cells.
/// Cells without an attribute value are ignored.
pub fn build_pivot_table(cells: &[AggregateCell], attribute_header: &str) -> PivotTable {
    let mut categories: Vec<GroupValue> = Vec::new();
    let mut attributes: Vec<GroupValue> = Vec::new();
    let mut totals: FxHashMap<(&GroupValue, &GroupValue), i64> = FxHashMap::default();

    for cell in cells {
        let attribute = match &cell.attribute {
            Some(attribute) => attribute,
            None => continue,
        };
        if !categories.contains(&cell.category) {
            categories.push(cell.category.clone());
        }
        if !attributes.contains(attribute) {
            attributes.push(attribute.clone());
        }
        *totals.entry((&cell.category, attribute)).or_insert(0) += cell.total;
    }

    categories.sort();
    attributes.sort();

    let mut headers = Vec::with_capacity(categories.len() + 2);
    headers.push(String::new());
    headers.push(attribute_header.to_string());
    headers.extend(categories.iter().map(|category| category.to_string()));

    let mut rows = Vec::with_capacity(attributes.len());
    let mut row_subtotals = Vec::with_capacity(attributes.len());
    let mut column_totals = vec![0i64; categories.len()];

    for attribute in &attributes {
        let subtotal: i64 = categories
            .iter()
            .map(|category| totals.get(&(category, attribute)).copied().unwrap_or(0))
            .sum();

        let row: Vec<PercentageTotal> = categories
            .iter()
            .enumerate()
            .map(|(col, category)| {
                let total = totals.get(&(category, attribute)).copied().unwrap_or(0);
                column_totals[col] += total;
                PercentageTotal {
                    percentage: percentage(total, subtotal),
                    total,
                }
            })
            .collect();

        rows.push(row);
        row_subtotals.push(subtotal);
    }

    let grand_total = row_subtotals.iter().sum();

    PivotTable {
        headers,
        categories,
        attributes,
        rows,
        row_subtotals,
        column_totals,
        grand_total,
    }
}

impl PivotTable {
    /// Per-category share of the grand total, in category order.
    pub fn totals_row(&self) -> Vec<PercentageTotal> {
        self.column_totals
            .iter()
            .map(|&total| PercentageTotal {
                percentage: percentage(total, self.grand_total),
                total,
            })
            .collect()
    }
}

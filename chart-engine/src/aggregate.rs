//! FILENAME: chart-engine/src/aggregate.rs
//! Grouping and universe normalization.
//!
//! Rows are grouped by (category, attribute value) and a count metric is
//! summed per group. Group values are interned as [`GroupValue`], whose
//! ordering puts numeric values before text, so mixed category sets sort
//! deterministically. Normalization merges aggregates against a fixed
//! ordered category universe with a zero default.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use warehouse::CategoryDescriptor;

/// A grouping value: a dimension key or a categorical label.
/// Ordering: numbers before text, numbers ascending, text lexicographic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GroupValue {
    Number(i64),
    Text(String),
}

impl fmt::Display for GroupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupValue::Number(n) => write!(f, "{}", n),
            GroupValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One aggregated group: unique per (category, attribute) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateCell {
    pub category: GroupValue,

    /// The attribute-dimension value, or None when grouping by category
    /// only.
    pub attribute: Option<GroupValue>,

    /// Summed count metric; never negative for count inputs.
    pub total: i64,
}

/// Composite group key; two levels at most (category, attribute).
type GroupKey = SmallVec<[GroupValue; 2]>;

/// Groups rows by category and sums the count metric per group.
/// Output order is unspecified; callers sort.
pub fn aggregate<R, I, C, N>(rows: I, category_of: C, count_of: N) -> Vec<AggregateCell>
where
    I: IntoIterator<Item = R>,
    C: Fn(&R) -> GroupValue,
    N: Fn(&R) -> i64,
{
    let mut groups: FxHashMap<GroupKey, i64> = FxHashMap::default();

    for row in rows {
        let key: GroupKey = smallvec![category_of(&row)];
        *groups.entry(key).or_insert(0) += count_of(&row);
    }

    groups
        .into_iter()
        .map(|(mut key, total)| AggregateCell {
            category: key.remove(0),
            attribute: None,
            total,
        })
        .collect()
}

/// Groups rows by (category, attribute value) and sums the count metric
/// per group. Identical pairs merge by summation; output order is
/// unspecified.
pub fn aggregate_with_attribute<R, I, C, A, N>(
    rows: I,
    category_of: C,
    attribute_of: A,
    count_of: N,
) -> Vec<AggregateCell>
where
    I: IntoIterator<Item = R>,
    C: Fn(&R) -> GroupValue,
    A: Fn(&R) -> GroupValue,
    N: Fn(&R) -> i64,
{
    let mut groups: FxHashMap<GroupKey, i64> = FxHashMap::default();

    for row in rows {
        let key: GroupKey = smallvec![category_of(&row), attribute_of(&row)];
        *groups.entry(key).or_insert(0) += count_of(&row);
    }

    groups
        .into_iter()
        .map(|(mut key, total)| {
            let attribute = key.remove(1);
            AggregateCell {
                category: key.remove(0),
                attribute: Some(attribute),
                total,
            }
        })
        .collect()
}

/// Left-join-like merge of aggregates against a fixed ordered universe.
///
/// Every universe category appears exactly once, in universe order, with
/// total 0 when no aggregate matches. Aggregates whose category is not in
/// the universe are dropped (this is how the "not applicable" sentinel is
/// excluded from exemption output).
pub fn normalize_to_universe(
    cells: &[AggregateCell],
    universe: &[CategoryDescriptor],
) -> Vec<AggregateCell> {
    universe
        .iter()
        .map(|descriptor| {
            let category = GroupValue::Number(descriptor.key as i64);
            let total = cells
                .iter()
                .filter(|cell| cell.category == category)
                .map(|cell| cell.total)
                .sum();
            AggregateCell {
                category,
                attribute: None,
                total,
            }
        })
        .collect()
}

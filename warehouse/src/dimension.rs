//! FILENAME: warehouse/src/dimension.rs
//! Dimension keys and descriptors.
//!
//! Facts reference dimensions by key. The values a chart needs for
//! filtering or grouping (assessment identity, performance level label)
//! are pre-fetched into the fact row as plain data, so the engine never
//! resolves a dimension while iterating.

use serde::{Deserialize, Serialize};

/// Key into the school dimension.
pub type SchoolKey = i32;

/// Key into the school year dimension (e.g. 2017 for the 2016-17 year).
pub type SchoolYearKey = i16;

/// Key into the assessment dimension.
pub type AssessmentKey = i32;

/// Key into the performance level dimension.
pub type PerformanceLevelKey = i32;

/// Key into the good cause exemption junk dimension.
pub type ExemptionKey = i32;

/// The exemption key reserved for rows where no exemption applies.
/// Excluded from the exemption category universe.
pub const EXEMPTION_NOT_APPLICABLE: ExemptionKey = 3;

/// Assessment identity carried on a fact row: the key plus the
/// title/subject pair used as a filter fallback when no key set is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRef {
    pub key: AssessmentKey,
    pub title: String,
    pub subject: String,
}

/// A performance level with its display label (the grouping value).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceLevel {
    pub key: PerformanceLevelKey,
    pub label: String,
}

/// One entry of an externally supplied category universe.
/// The universe is ordered; charts normalized against it show every
/// category whether or not data exists for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDescriptor {
    pub key: ExemptionKey,
    pub label: String,
}

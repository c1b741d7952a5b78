//! FILENAME: chart-engine/src/definition.rs
//! Filter criteria - the serializable chart request.
//!
//! This module contains the types needed to DESCRIBE which rows a chart
//! covers. These structures are designed to be:
//! - Serializable (request payloads from an outer HTTP layer)
//! - Immutable snapshots of user intent
//!
//! An empty set imposes no restriction; only the school year is required,
//! and that requirement is enforced when the filter is compiled (see
//! `filter`), not at deserialization time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use warehouse::{AssessmentKey, AttributeKey, ExemptionKey, PerformanceLevelKey, SchoolYearKey};

// ============================================================================
// ASSESSMENT CRITERIA
// ============================================================================

/// Filter criteria for assessment charts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentFilter {
    /// The school year to report on. Required; validated on compile.
    pub school_year: Option<SchoolYearKey>,

    /// Explicit assessment keys. When empty, the title/subject pair below
    /// is used to identify the assessment instead.
    pub assessments: Vec<AssessmentKey>,

    /// Assessment title fallback, paired with `subject`.
    pub assessment_title: Option<String>,

    /// Academic subject fallback, paired with `assessment_title`.
    pub subject: Option<String>,

    /// Per-attribute value sets. A key that is absent, or mapped to an
    /// empty set, imposes no restriction on that attribute.
    pub attributes: HashMap<AttributeKey, Vec<String>>,

    /// Performance level keys to include.
    pub performance_levels: Vec<PerformanceLevelKey>,

    /// Good cause exemption keys to include.
    pub good_cause_exemptions: Vec<ExemptionKey>,
}

impl AssessmentFilter {
    /// Creates criteria for a school year with no other restrictions.
    pub fn for_year(school_year: SchoolYearKey) -> Self {
        AssessmentFilter {
            school_year: Some(school_year),
            ..AssessmentFilter::default()
        }
    }
}

// ============================================================================
// ENROLLMENT CRITERIA
// ============================================================================

/// Filter criteria for demographic charts that are not assessment-bound
/// (attendance). Only the year and attribute sets apply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrollmentFilter {
    /// The school year to report on. Required; validated on compile.
    pub school_year: Option<SchoolYearKey>,

    /// Per-attribute value sets; empty or absent means unrestricted.
    pub attributes: HashMap<AttributeKey, Vec<String>>,
}

impl EnrollmentFilter {
    /// Creates criteria for a school year with no other restrictions.
    pub fn for_year(school_year: SchoolYearKey) -> Self {
        EnrollmentFilter {
            school_year: Some(school_year),
            ..EnrollmentFilter::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let filter: AssessmentFilter = serde_json::from_str("{}").unwrap();

        assert_eq!(filter.school_year, None);
        assert!(filter.assessments.is_empty());
        assert!(filter.attributes.is_empty());
        assert!(filter.performance_levels.is_empty());
    }

    #[test]
    fn test_attribute_sets_deserialize_with_enum_keys() {
        let json = r#"{
            "school_year": 2017,
            "attributes": { "Ethnicity": ["Hispanic", "White"] }
        }"#;
        let filter: AssessmentFilter = serde_json::from_str(json).unwrap();

        assert_eq!(filter.school_year, Some(2017));
        assert_eq!(
            filter.attributes[&AttributeKey::Ethnicity],
            vec!["Hispanic".to_string(), "White".to_string()]
        );
    }

    #[test]
    fn test_filter_round_trips_through_json() {
        let mut filter = AssessmentFilter::for_year(2018);
        filter.assessments = vec![4, 7];
        filter
            .attributes
            .insert(AttributeKey::Grade, vec!["03".to_string()]);

        let json = serde_json::to_string(&filter).unwrap();
        let back: AssessmentFilter = serde_json::from_str(&json).unwrap();

        assert_eq!(back.school_year, Some(2018));
        assert_eq!(back.assessments, vec![4, 7]);
        assert_eq!(back.attributes[&AttributeKey::Grade], vec!["03".to_string()]);
    }
}

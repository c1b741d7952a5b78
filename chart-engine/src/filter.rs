//! FILENAME: chart-engine/src/filter.rs
//! Compiled row predicates.
//!
//! Criteria are compiled into a row filter once per chart call. Compiling
//! validates the one required field (school year); matching applies the
//! conjunctive predicates in a fixed order: year, assessment identity,
//! then every non-empty optional set. Filtering is a lazy iterator
//! adapter with no side effects.

use std::collections::HashMap;

use warehouse::{AssessmentFact, AttendanceFact, AttributeKey, Demographic, SchoolYearKey};

use crate::definition::{AssessmentFilter, EnrollmentFilter};
use crate::error::ChartError;

/// Row predicate compiled from [`AssessmentFilter`] criteria.
pub struct AssessmentRowFilter<'a> {
    criteria: &'a AssessmentFilter,
    school_year: SchoolYearKey,
}

impl<'a> AssessmentRowFilter<'a> {
    /// Validates the criteria and compiles the predicate.
    pub fn compile(criteria: &'a AssessmentFilter) -> Result<Self, ChartError> {
        let school_year = criteria.school_year.ok_or(ChartError::MissingSchoolYear)?;
        Ok(AssessmentRowFilter {
            criteria,
            school_year,
        })
    }

    /// Returns true when a fact row satisfies every predicate.
    pub fn matches(&self, fact: &AssessmentFact) -> bool {
        if fact.school_year_key != self.school_year {
            return false;
        }
        if !self.matches_assessment(fact) {
            return false;
        }
        if !demographic_matches(&self.criteria.attributes, &fact.demographic) {
            return false;
        }
        if !self.criteria.performance_levels.is_empty()
            && !self
                .criteria
                .performance_levels
                .contains(&fact.performance_level.key)
        {
            return false;
        }
        if !self.criteria.good_cause_exemptions.is_empty()
            && !self
                .criteria
                .good_cause_exemptions
                .contains(&fact.good_cause_exemption_key)
        {
            return false;
        }
        true
    }

    /// Lazily filters a row sequence.
    pub fn apply<'r>(
        &'r self,
        rows: impl IntoIterator<Item = &'r AssessmentFact> + 'r,
    ) -> impl Iterator<Item = &'r AssessmentFact> + 'r {
        rows.into_iter().filter(move |fact| self.matches(fact))
    }

    /// Assessment identity: an explicit key set when given, otherwise the
    /// title/subject pair. An absent title or subject matches nothing.
    fn matches_assessment(&self, fact: &AssessmentFact) -> bool {
        if !self.criteria.assessments.is_empty() {
            return self.criteria.assessments.contains(&fact.assessment.key);
        }
        self.criteria.assessment_title.as_deref() == Some(fact.assessment.title.as_str())
            && self.criteria.subject.as_deref() == Some(fact.assessment.subject.as_str())
    }
}

/// Row predicate compiled from [`EnrollmentFilter`] criteria.
pub struct EnrollmentRowFilter<'a> {
    criteria: &'a EnrollmentFilter,
    school_year: SchoolYearKey,
}

impl<'a> EnrollmentRowFilter<'a> {
    /// Validates the criteria and compiles the predicate.
    pub fn compile(criteria: &'a EnrollmentFilter) -> Result<Self, ChartError> {
        let school_year = criteria.school_year.ok_or(ChartError::MissingSchoolYear)?;
        Ok(EnrollmentRowFilter {
            criteria,
            school_year,
        })
    }

    /// Returns true when an attendance row satisfies every predicate.
    pub fn matches(&self, fact: &AttendanceFact) -> bool {
        fact.school_year_key == self.school_year
            && demographic_matches(&self.criteria.attributes, &fact.demographic)
    }

    /// Lazily filters a row sequence.
    pub fn apply<'r>(
        &'r self,
        rows: impl IntoIterator<Item = &'r AttendanceFact> + 'r,
    ) -> impl Iterator<Item = &'r AttendanceFact> + 'r {
        rows.into_iter().filter(move |fact| self.matches(fact))
    }
}

/// True when the demographic passes every non-empty attribute value set.
fn demographic_matches(
    attributes: &HashMap<AttributeKey, Vec<String>>,
    demographic: &Demographic,
) -> bool {
    attributes.iter().all(|(key, values)| {
        values.is_empty() || values.iter().any(|value| value == key.select(demographic))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use warehouse::{AssessmentRef, PerformanceLevel};

    fn create_test_fact(year: SchoolYearKey, ethnicity: &str) -> AssessmentFact {
        AssessmentFact {
            demographic: Demographic {
                ethnicity: ethnicity.to_string(),
                english_language_learner_status: "Non English Language Learner".to_string(),
                free_reduced_lunch_status: "Full Price Lunch".to_string(),
                special_education_status: "Non Special Education".to_string(),
                grade_level: "03".to_string(),
            },
            school_key: 1,
            school_year_key: year,
            assessment: AssessmentRef {
                key: 10,
                title: "Grade 3 Reading".to_string(),
                subject: "Reading".to_string(),
            },
            performance_level: PerformanceLevel {
                key: 2,
                label: "Proficient".to_string(),
            },
            good_cause_exemption_key: 3,
            student_count: 5,
        }
    }

    #[test]
    fn test_compile_requires_school_year() {
        let criteria = AssessmentFilter::default();
        let result = AssessmentRowFilter::compile(&criteria);
        assert_eq!(result.err(), Some(ChartError::MissingSchoolYear));
    }

    #[test]
    fn test_year_always_restricts() {
        let mut criteria = AssessmentFilter::for_year(2017);
        criteria.assessments = vec![10];
        let filter = AssessmentRowFilter::compile(&criteria).unwrap();

        assert!(filter.matches(&create_test_fact(2017, "White")));
        assert!(!filter.matches(&create_test_fact(2016, "White")));
    }

    #[test]
    fn test_assessment_key_set_overrides_title_fallback() {
        let mut criteria = AssessmentFilter::for_year(2017);
        criteria.assessments = vec![99];
        // Title matches, but the explicit key set wins and excludes key 10.
        criteria.assessment_title = Some("Grade 3 Reading".to_string());
        criteria.subject = Some("Reading".to_string());

        let filter = AssessmentRowFilter::compile(&criteria).unwrap();
        assert!(!filter.matches(&create_test_fact(2017, "White")));
    }

    #[test]
    fn test_title_subject_fallback() {
        let mut criteria = AssessmentFilter::for_year(2017);
        criteria.assessment_title = Some("Grade 3 Reading".to_string());
        criteria.subject = Some("Reading".to_string());

        let filter = AssessmentRowFilter::compile(&criteria).unwrap();
        assert!(filter.matches(&create_test_fact(2017, "White")));

        let mut other_subject = create_test_fact(2017, "White");
        other_subject.assessment.subject = "Math".to_string();
        assert!(!filter.matches(&other_subject));
    }

    #[test]
    fn test_absent_title_matches_nothing() {
        let criteria = AssessmentFilter::for_year(2017);
        let filter = AssessmentRowFilter::compile(&criteria).unwrap();
        assert!(!filter.matches(&create_test_fact(2017, "White")));
    }

    #[test]
    fn test_empty_attribute_set_imposes_no_restriction() {
        let mut criteria = AssessmentFilter::for_year(2017);
        criteria.assessments = vec![10];
        criteria.attributes.insert(AttributeKey::Ethnicity, Vec::new());

        let filter = AssessmentRowFilter::compile(&criteria).unwrap();
        assert!(filter.matches(&create_test_fact(2017, "Hispanic")));
    }

    #[test]
    fn test_attribute_set_restricts() {
        let mut criteria = AssessmentFilter::for_year(2017);
        criteria.assessments = vec![10];
        criteria
            .attributes
            .insert(AttributeKey::Ethnicity, vec!["Hispanic".to_string()]);

        let filter = AssessmentRowFilter::compile(&criteria).unwrap();
        assert!(filter.matches(&create_test_fact(2017, "Hispanic")));
        assert!(!filter.matches(&create_test_fact(2017, "White")));
    }

    #[test]
    fn test_category_key_sets_restrict() {
        let mut criteria = AssessmentFilter::for_year(2017);
        criteria.assessments = vec![10];
        criteria.performance_levels = vec![1];

        let filter = AssessmentRowFilter::compile(&criteria).unwrap();
        // Fixture rows are performance level key 2.
        assert!(!filter.matches(&create_test_fact(2017, "White")));

        criteria.performance_levels = vec![1, 2];
        let filter = AssessmentRowFilter::compile(&criteria).unwrap();
        assert!(filter.matches(&create_test_fact(2017, "White")));
    }

    #[test]
    fn test_apply_is_lazy_and_filters() {
        let facts = vec![
            create_test_fact(2017, "White"),
            create_test_fact(2016, "White"),
            create_test_fact(2017, "Hispanic"),
        ];
        let mut criteria = AssessmentFilter::for_year(2017);
        criteria.assessments = vec![10];
        let filter = AssessmentRowFilter::compile(&criteria).unwrap();

        let kept: Vec<_> = filter.apply(facts.iter()).collect();
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_enrollment_filter_on_attendance_rows() {
        let fact = AttendanceFact {
            demographic: Demographic {
                ethnicity: "White".to_string(),
                english_language_learner_status: "Non English Language Learner".to_string(),
                free_reduced_lunch_status: "Free Lunch".to_string(),
                special_education_status: "Non Special Education".to_string(),
                grade_level: "04".to_string(),
            },
            school_key: 1,
            school_year_key: 2017,
            total_absences: 4,
            total_instructional_days: 180,
        };

        let mut criteria = EnrollmentFilter::for_year(2017);
        criteria
            .attributes
            .insert(AttributeKey::Grade, vec!["04".to_string()]);
        let filter = EnrollmentRowFilter::compile(&criteria).unwrap();
        assert!(filter.matches(&fact));

        criteria
            .attributes
            .insert(AttributeKey::Grade, vec!["05".to_string()]);
        let filter = EnrollmentRowFilter::compile(&criteria).unwrap();
        assert!(!filter.matches(&fact));
    }
}

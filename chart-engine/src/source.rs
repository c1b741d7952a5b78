//! FILENAME: chart-engine/src/source.rs
//! Data-source collaborators.
//!
//! The engine defines the interfaces it consumes and receives
//! implementations by constructor injection; there is no ambient state.
//! A source may pre-filter rows or return a full snapshot - the engine
//! applies its own row filter either way.

use warehouse::{AssessmentFact, AttendanceFact, CategoryDescriptor};

use crate::definition::{AssessmentFilter, EnrollmentFilter};

/// Supplies assessment fact rows for a chart request.
pub trait AssessmentFactSource {
    fn fetch(&self, criteria: &AssessmentFilter) -> Vec<AssessmentFact>;
}

/// Supplies attendance fact rows for a chart request.
pub trait AttendanceFactSource {
    fn fetch(&self, criteria: &EnrollmentFilter) -> Vec<AttendanceFact>;
}

/// Supplies the ordered exemption category universe.
/// The universe excludes the "not applicable" sentinel.
pub trait ExemptionCategorySource {
    fn categories(&self) -> Vec<CategoryDescriptor>;
}

/// A materialized row snapshot; returns every row and lets the engine
/// filter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssessmentFacts {
    facts: Vec<AssessmentFact>,
}

impl InMemoryAssessmentFacts {
    pub fn new(facts: Vec<AssessmentFact>) -> Self {
        InMemoryAssessmentFacts { facts }
    }
}

impl AssessmentFactSource for InMemoryAssessmentFacts {
    fn fetch(&self, _criteria: &AssessmentFilter) -> Vec<AssessmentFact> {
        self.facts.clone()
    }
}

/// A materialized attendance snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttendanceFacts {
    facts: Vec<AttendanceFact>,
}

impl InMemoryAttendanceFacts {
    pub fn new(facts: Vec<AttendanceFact>) -> Self {
        InMemoryAttendanceFacts { facts }
    }
}

impl AttendanceFactSource for InMemoryAttendanceFacts {
    fn fetch(&self, _criteria: &EnrollmentFilter) -> Vec<AttendanceFact> {
        self.facts.clone()
    }
}

/// A fixed, ordered category universe.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExemptionCategories {
    categories: Vec<CategoryDescriptor>,
}

impl InMemoryExemptionCategories {
    pub fn new(categories: Vec<CategoryDescriptor>) -> Self {
        InMemoryExemptionCategories { categories }
    }
}

impl ExemptionCategorySource for InMemoryExemptionCategories {
    fn categories(&self) -> Vec<CategoryDescriptor> {
        self.categories.clone()
    }
}

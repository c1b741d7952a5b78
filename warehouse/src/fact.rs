//! FILENAME: warehouse/src/fact.rs
//! Fact rows - one measured count per dimension-key combination.
//!
//! Rows are immutable inputs to the chart engine: it filters, groups, and
//! sums them but never mutates or persists them. Dimension values needed
//! downstream are embedded as plain data (see `dimension`).

use serde::{Deserialize, Serialize};

use crate::demographic::Demographic;
use crate::dimension::{AssessmentRef, ExemptionKey, PerformanceLevel, SchoolKey, SchoolYearKey};

/// One assessment result count: how many students of a demographic at a
/// school in a year scored at a performance level, with the good cause
/// exemption that applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentFact {
    pub demographic: Demographic,
    pub school_key: SchoolKey,
    pub school_year_key: SchoolYearKey,
    pub assessment: AssessmentRef,
    pub performance_level: PerformanceLevel,
    pub good_cause_exemption_key: ExemptionKey,
    pub student_count: i64,
}

/// Attendance counts for a demographic at a school in a year.
/// Carries two metrics; present days are derived as
/// `total_instructional_days - total_absences`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceFact {
    pub demographic: Demographic,
    pub school_key: SchoolKey,
    pub school_year_key: SchoolYearKey,
    pub total_absences: i64,
    pub total_instructional_days: i64,
}

//! FILENAME: chart-engine/src/engine.rs
//! Chart services - the calculation entry points.
//!
//! Each service holds its injected sources and is stateless per call:
//! compile the row filter, fetch and filter rows, aggregate, shape, and
//! package a chart model. Nothing is cached between calls, so concurrent
//! calls with different criteria are independent.

use log::debug;
use warehouse::{AssessmentFact, AttributeKey, EXEMPTION_NOT_APPLICABLE};

use crate::aggregate::{
    aggregate, aggregate_with_attribute, normalize_to_universe, GroupValue,
};
use crate::definition::{AssessmentFilter, EnrollmentFilter};
use crate::error::ChartError;
use crate::filter::{AssessmentRowFilter, EnrollmentRowFilter};
use crate::pivot::{build_pivot_table, percentage};
use crate::source::{AssessmentFactSource, AttendanceFactSource, ExemptionCategorySource};
use crate::view::{PercentageTotal, PercentageTotalBarChartModel, PieChartModel};

// ============================================================================
// ASSESSMENT CHARTS
// ============================================================================

/// Assessment chart service.
pub struct AssessmentCharts<F, E> {
    facts: F,
    exemption_categories: E,
}

impl<F, E> AssessmentCharts<F, E>
where
    F: AssessmentFactSource,
    E: ExemptionCategorySource,
{
    pub fn new(facts: F, exemption_categories: E) -> Self {
        AssessmentCharts {
            facts,
            exemption_categories,
        }
    }

    /// Count of students per performance level.
    pub fn by_performance_level(
        &self,
        criteria: &AssessmentFilter,
    ) -> Result<PieChartModel, ChartError> {
        let rows = self.filtered_rows(criteria)?;

        let mut cells = aggregate(
            rows.iter(),
            |fact| GroupValue::Text(fact.performance_level.label.clone()),
            |fact| fact.student_count,
        );
        cells.sort_by(|a, b| a.category.cmp(&b.category));

        let total = cells.iter().map(|cell| cell.total).sum();

        Ok(PieChartModel {
            title: "Performance Level".to_string(),
            headers: vec![
                String::new(),
                "Performance Level".to_string(),
                "Performance Count".to_string(),
            ],
            labels: cells.iter().map(|cell| cell.category.to_string()).collect(),
            data: cells.iter().map(|cell| cell.total).collect(),
            total,
            show_chart: true,
        })
    }

    /// Performance level broken down by one demographic attribute.
    pub fn performance_level_by(
        &self,
        attribute: AttributeKey,
        criteria: &AssessmentFilter,
    ) -> Result<PercentageTotalBarChartModel, ChartError> {
        let title = match attribute {
            AttributeKey::Ethnicity => "Performance Level by Ethnicity",
            AttributeKey::EnglishLanguageLearner => {
                "Performance Level by English Language Learners"
            }
            AttributeKey::LunchStatus => "Performance Level by Free/Reduced Price Meals",
            AttributeKey::SpecialEducation => "Performance Level by Special Education",
            AttributeKey::Grade => "Performance Level by Grade",
        };

        let rows = self.filtered_rows(criteria)?;

        let cells = aggregate_with_attribute(
            rows.iter(),
            |fact| GroupValue::Text(fact.performance_level.label.clone()),
            |fact| GroupValue::Text(attribute.select(&fact.demographic).to_string()),
            |fact| fact.student_count,
        );

        let table = build_pivot_table(&cells, attribute.header_label());
        let totals = table.totals_row();

        Ok(PercentageTotalBarChartModel {
            title: title.to_string(),
            labels: table.categories.iter().map(ToString::to_string).collect(),
            series: table.attributes.iter().map(ToString::to_string).collect(),
            headers: table.headers,
            data: table.rows,
            totals: Some(totals),
            total_row_title: Some("Performance Level".to_string()),
            show_chart: true,
            show_percentage: true,
            hide_total: false,
        })
    }

    pub fn performance_level_by_ethnicity(
        &self,
        criteria: &AssessmentFilter,
    ) -> Result<PercentageTotalBarChartModel, ChartError> {
        self.performance_level_by(AttributeKey::Ethnicity, criteria)
    }

    pub fn performance_level_by_english_language_learner(
        &self,
        criteria: &AssessmentFilter,
    ) -> Result<PercentageTotalBarChartModel, ChartError> {
        self.performance_level_by(AttributeKey::EnglishLanguageLearner, criteria)
    }

    pub fn performance_level_by_lunch_status(
        &self,
        criteria: &AssessmentFilter,
    ) -> Result<PercentageTotalBarChartModel, ChartError> {
        self.performance_level_by(AttributeKey::LunchStatus, criteria)
    }

    pub fn performance_level_by_special_education(
        &self,
        criteria: &AssessmentFilter,
    ) -> Result<PercentageTotalBarChartModel, ChartError> {
        self.performance_level_by(AttributeKey::SpecialEducation, criteria)
    }

    pub fn performance_level_by_grade(
        &self,
        criteria: &AssessmentFilter,
    ) -> Result<PercentageTotalBarChartModel, ChartError> {
        self.performance_level_by(AttributeKey::Grade, criteria)
    }

    /// Good cause exemptions compared across the category universe.
    ///
    /// Returns `Ok(None)` when every filtered row (or no row at all)
    /// carries the "not applicable" sentinel; the caller omits the chart.
    pub fn by_good_cause_exemption(
        &self,
        criteria: &AssessmentFilter,
    ) -> Result<Option<PercentageTotalBarChartModel>, ChartError> {
        let rows = self.filtered_rows(criteria)?;

        if rows
            .iter()
            .all(|fact| fact.good_cause_exemption_key == EXEMPTION_NOT_APPLICABLE)
        {
            debug!("good cause exemption chart suppressed: no meaningful rows");
            return Ok(None);
        }

        let universe = self.exemption_categories.categories();

        let cells = aggregate(
            rows.iter(),
            |fact| GroupValue::Number(fact.good_cause_exemption_key as i64),
            |fact| fact.student_count,
        );
        let normalized = normalize_to_universe(&cells, &universe);

        let universe_total: i64 = normalized.iter().map(|cell| cell.total).sum();
        let series_row: Vec<PercentageTotal> = normalized
            .iter()
            .map(|cell| PercentageTotal {
                percentage: percentage(cell.total, universe_total),
                total: cell.total,
            })
            .collect();

        Ok(Some(PercentageTotalBarChartModel {
            title: "Good Cause Exemptions".to_string(),
            headers: vec![
                String::new(),
                "Good Cause Exemptions".to_string(),
                "Total".to_string(),
            ],
            labels: universe
                .iter()
                .map(|descriptor| descriptor.label.clone())
                .collect(),
            series: vec!["Good Cause Exemptions".to_string()],
            data: vec![series_row],
            totals: None,
            total_row_title: None,
            show_chart: true,
            show_percentage: true,
            hide_total: true,
        }))
    }

    /// Fetches the snapshot and keeps the rows the criteria allow.
    fn filtered_rows(
        &self,
        criteria: &AssessmentFilter,
    ) -> Result<Vec<AssessmentFact>, ChartError> {
        let row_filter = AssessmentRowFilter::compile(criteria)?;
        let facts = self.facts.fetch(criteria);
        let fetched = facts.len();
        let rows: Vec<AssessmentFact> = facts
            .into_iter()
            .filter(|fact| row_filter.matches(fact))
            .collect();
        debug!("assessment chart: kept {} of {} fetched rows", rows.len(), fetched);
        Ok(rows)
    }
}

// ============================================================================
// ATTENDANCE CHARTS
// ============================================================================

/// Attendance chart service.
///
/// Each fact contributes to two derived categories: Absent
/// (`total_absences`) and Present (`total_instructional_days -
/// total_absences`).
pub struct AttendanceCharts<F> {
    facts: F,
}

impl<F> AttendanceCharts<F>
where
    F: AttendanceFactSource,
{
    pub fn new(facts: F) -> Self {
        AttendanceCharts { facts }
    }

    /// Attendance broken down by one demographic attribute.
    pub fn by_attribute(
        &self,
        attribute: AttributeKey,
        criteria: &EnrollmentFilter,
    ) -> Result<PercentageTotalBarChartModel, ChartError> {
        let title = match attribute {
            AttributeKey::Ethnicity => "Attendance by Ethnicity",
            AttributeKey::EnglishLanguageLearner => "Attendance by English Language Learners",
            AttributeKey::LunchStatus => "Attendance by Free/Reduced Price Meals",
            AttributeKey::SpecialEducation => "Attendance by Special Education",
            AttributeKey::Grade => "Attendance by Grade",
        };

        let row_filter = EnrollmentRowFilter::compile(criteria)?;
        let facts = self.facts.fetch(criteria);
        let rows: Vec<_> = row_filter.apply(facts.iter()).collect();
        debug!("attendance chart: kept {} of {} fetched rows", rows.len(), facts.len());

        // Expand each fact into its two (category, attribute, count)
        // contributions before grouping.
        let contributions: Vec<(GroupValue, GroupValue, i64)> = rows
            .iter()
            .flat_map(|fact| {
                let value = GroupValue::Text(attribute.select(&fact.demographic).to_string());
                let present = fact.total_instructional_days - fact.total_absences;
                [
                    (
                        GroupValue::Text("Absent".to_string()),
                        value.clone(),
                        fact.total_absences,
                    ),
                    (GroupValue::Text("Present".to_string()), value, present),
                ]
            })
            .collect();

        let cells = aggregate_with_attribute(
            contributions.into_iter(),
            |row| row.0.clone(),
            |row| row.1.clone(),
            |row| row.2,
        );

        let table = build_pivot_table(&cells, attribute.header_label());
        let totals = table.totals_row();

        Ok(PercentageTotalBarChartModel {
            title: title.to_string(),
            labels: table.categories.iter().map(ToString::to_string).collect(),
            series: table.attributes.iter().map(ToString::to_string).collect(),
            headers: table.headers,
            data: table.rows,
            totals: Some(totals),
            total_row_title: Some("Attendance".to_string()),
            show_chart: true,
            show_percentage: true,
            hide_total: false,
        })
    }

    pub fn by_ethnicity(
        &self,
        criteria: &EnrollmentFilter,
    ) -> Result<PercentageTotalBarChartModel, ChartError> {
        self.by_attribute(AttributeKey::Ethnicity, criteria)
    }

    pub fn by_english_language_learner(
        &self,
        criteria: &EnrollmentFilter,
    ) -> Result<PercentageTotalBarChartModel, ChartError> {
        self.by_attribute(AttributeKey::EnglishLanguageLearner, criteria)
    }

    pub fn by_grade(
        &self,
        criteria: &EnrollmentFilter,
    ) -> Result<PercentageTotalBarChartModel, ChartError> {
        self.by_attribute(AttributeKey::Grade, criteria)
    }

    pub fn by_lunch_status(
        &self,
        criteria: &EnrollmentFilter,
    ) -> Result<PercentageTotalBarChartModel, ChartError> {
        self.by_attribute(AttributeKey::LunchStatus, criteria)
    }

    pub fn by_special_education(
        &self,
        criteria: &EnrollmentFilter,
    ) -> Result<PercentageTotalBarChartModel, ChartError> {
        self.by_attribute(AttributeKey::SpecialEducation, criteria)
    }
}

//! FILENAME: chart-engine/benches/chart_calculations.rs
//! Benchmarks for the filter -> aggregate -> pivot path.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chart_engine::{
    AssessmentCharts, AssessmentFilter, InMemoryAssessmentFacts, InMemoryExemptionCategories,
};
use warehouse::{
    AssessmentFact, AssessmentRef, CategoryDescriptor, Demographic, PerformanceLevel,
};

const ETHNICITIES: [&str; 5] = ["Asian", "Black", "Hispanic", "Multiracial", "White"];
const LEVELS: [&str; 4] = ["Below Basic", "Basic", "Proficient", "Advanced"];

fn create_facts(count: usize) -> Vec<AssessmentFact> {
    (0..count)
        .map(|i| AssessmentFact {
            demographic: Demographic {
                ethnicity: ETHNICITIES[i % ETHNICITIES.len()].to_string(),
                english_language_learner_status: if i % 7 == 0 {
                    "English Language Learner".to_string()
                } else {
                    "Non English Language Learner".to_string()
                },
                free_reduced_lunch_status: "Full Price Lunch".to_string(),
                special_education_status: "Non Special Education".to_string(),
                grade_level: format!("{:02}", (i % 6) + 3),
            },
            school_key: (i % 40) as i32,
            school_year_key: 2017,
            assessment: AssessmentRef {
                key: 10,
                title: "Statewide Reading".to_string(),
                subject: "Reading".to_string(),
            },
            performance_level: PerformanceLevel {
                key: (i % LEVELS.len()) as i32 + 1,
                label: LEVELS[i % LEVELS.len()].to_string(),
            },
            good_cause_exemption_key: 3,
            student_count: (i % 30 + 1) as i64,
        })
        .collect()
}

fn create_charts(
    count: usize,
) -> AssessmentCharts<InMemoryAssessmentFacts, InMemoryExemptionCategories> {
    AssessmentCharts::new(
        InMemoryAssessmentFacts::new(create_facts(count)),
        InMemoryExemptionCategories::new(vec![
            CategoryDescriptor {
                key: 1,
                label: "Passed alternate assessment".to_string(),
            },
            CategoryDescriptor {
                key: 2,
                label: "Promoted by grade committee".to_string(),
            },
        ]),
    )
}

fn bench_charts(c: &mut Criterion) {
    let charts = create_charts(10_000);
    let mut criteria = AssessmentFilter::for_year(2017);
    criteria.assessments = vec![10];

    c.bench_function("by_performance_level 10k rows", |b| {
        b.iter(|| charts.by_performance_level(black_box(&criteria)).unwrap())
    });

    c.bench_function("performance_level_by_ethnicity 10k rows", |b| {
        b.iter(|| {
            charts
                .performance_level_by_ethnicity(black_box(&criteria))
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_charts);
criterion_main!(benches);

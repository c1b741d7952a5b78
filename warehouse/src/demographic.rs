//! FILENAME: warehouse/src/demographic.rs
//! The demographic junk dimension and its attribute selector.
//!
//! Charts slice counts by one demographic attribute at a time. The
//! attribute is chosen with [`AttributeKey`], a closed enumeration mapped
//! by an exhaustive `match` to a typed accessor, so every selectable
//! attribute is checked at compile time.

use serde::{Deserialize, Serialize};

/// A snapshot of the demographic junk dimension for one fact row.
/// All values are categorical display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographic {
    pub ethnicity: String,
    pub english_language_learner_status: String,
    pub free_reduced_lunch_status: String,
    pub special_education_status: String,
    pub grade_level: String,
}

/// Selectable demographic attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKey {
    Ethnicity,
    EnglishLanguageLearner,
    LunchStatus,
    SpecialEducation,
    Grade,
}

impl AttributeKey {
    /// Every selectable attribute, in display order.
    pub const ALL: [AttributeKey; 5] = [
        AttributeKey::Ethnicity,
        AttributeKey::EnglishLanguageLearner,
        AttributeKey::LunchStatus,
        AttributeKey::SpecialEducation,
        AttributeKey::Grade,
    ];

    /// Returns the categorical value of this attribute for a demographic.
    pub fn select(self, demographic: &Demographic) -> &str {
        match self {
            AttributeKey::Ethnicity => &demographic.ethnicity,
            AttributeKey::EnglishLanguageLearner => {
                &demographic.english_language_learner_status
            }
            AttributeKey::LunchStatus => &demographic.free_reduced_lunch_status,
            AttributeKey::SpecialEducation => &demographic.special_education_status,
            AttributeKey::Grade => &demographic.grade_level,
        }
    }

    /// Column header used for this attribute in pivot output.
    pub fn header_label(self) -> &'static str {
        match self {
            AttributeKey::Ethnicity => "Ethnicities",
            AttributeKey::EnglishLanguageLearner => "Language Statuses",
            AttributeKey::LunchStatus => "Lunch Statuses",
            AttributeKey::SpecialEducation => "Education Statuses",
            AttributeKey::Grade => "Grades",
        }
    }
}

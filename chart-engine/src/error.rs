//! FILENAME: chart-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("filter is missing the required school year")]
    MissingSchoolYear,
}

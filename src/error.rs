//! Error types for grading, aggregation and configuration.
//!
//! Input problems ([`ValidationError`]) and internal failures
//! ([`CalculationError`]) are kept apart so a caller can tell bad data from a
//! broken grade table.

use crate::grading::types::SkippedSubject;

/// A rank record that cannot be graded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("cohort size must be positive")]
    NonPositiveCohort,
    #[error("rank must be positive")]
    NonPositiveRank,
    #[error("tie-count must be positive")]
    NonPositiveTieCount,
    #[error("rank cannot exceed cohort size")]
    RankExceedsCohort,
    #[error("tie-count cannot exceed remaining cohort members")]
    TieCountExceedsRemaining,
}

/// The grade table could not produce a grade for a valid record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalculationError {
    #[error("grade table has no boundaries")]
    EmptyTable,
    #[error("percentile {0} is not a finite number")]
    NonFinitePercentile(f64),
}

/// Failure to grade a single subject.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GradeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to calculate grade for subject \"{subject}\": {source}")]
    Calculation {
        subject: String,
        source: CalculationError,
    },
}

impl GradeError {
    pub fn calculation(subject: &str, source: CalculationError) -> Self {
        GradeError::Calculation {
            subject: subject.to_string(),
            source,
        }
    }
}

/// Failure of a whole batch.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AggregateError {
    #[error("no subjects provided")]
    NoSubjects,
    #[error("no valid grades could be calculated")]
    NoValidGrades { skipped: Vec<SkippedSubject> },
}

/// Rejected engine configuration: an unknown scale or a malformed table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid grade scale '{0}': expected \"9\" or \"5\"")]
    InvalidScale(String),
    #[error("invalid grade table: {0}")]
    InvalidTable(String),
}

//! Data types used by the grading pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GradeError;

/// One enrollment record: a student's rank within a subject's cohort.
///
/// Fields are signed so that bad records survive deserialization and are
/// rejected by validation with a readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub unit: i64,
    pub rank: i64,
    #[serde(alias = "sameRank")]
    pub same_rank: i64,
    pub completer: i64,
}

impl Subject {
    pub fn new(name: &str, unit: i64, rank: i64, same_rank: i64, completer: i64) -> Self {
        Subject {
            name: name.to_string(),
            unit,
            rank,
            same_rank,
            completer,
        }
    }
}

/// Why a subject was left out of an average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipKind {
    Validation,
    Calculation,
    /// The record could not be deserialized at all.
    Malformed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSubject {
    pub name: String,
    pub reason: String,
    pub kind: SkipKind,
}

impl SkippedSubject {
    /// Builds a skip entry, normalizing a blank message to `"unknown error"`.
    pub fn new(name: &str, reason: &str, kind: SkipKind) -> Self {
        let reason = if reason.trim().is_empty() {
            "unknown error".to_string()
        } else {
            reason.to_string()
        };
        SkippedSubject {
            name: name.to_string(),
            reason,
            kind,
        }
    }

    pub fn from_grade_error(name: &str, err: &GradeError) -> Self {
        let kind = match err {
            GradeError::Validation(_) => SkipKind::Validation,
            GradeError::Calculation { .. } => SkipKind::Calculation,
        };
        Self::new(name, &err.to_string(), kind)
    }
}

/// Average grade over the subjects that could be graded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub average: f64,
    pub graded_count: usize,
    pub skipped: Vec<SkippedSubject>,
}

/// A single report row, written to CSV as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradedSubject {
    pub name: String,
    pub unit: i64,
    pub rank: i64,
    pub same_rank: i64,
    pub completer: i64,
    pub percentile: Option<f64>,
    pub grade: Option<u8>,
    pub error: Option<String>,
}

impl GradedSubject {
    pub fn from_grade(subject: &Subject, percentile: f64, grade: u8) -> Self {
        GradedSubject {
            percentile: Some(percentile),
            grade: Some(grade),
            ..Self::blank(subject)
        }
    }

    /// Create a row for a subject that failed to grade.
    pub fn from_error(subject: &Subject, err: &GradeError) -> Self {
        GradedSubject {
            error: Some(err.to_string()),
            ..Self::blank(subject)
        }
    }

    fn blank(subject: &Subject) -> Self {
        GradedSubject {
            name: subject.name.clone(),
            unit: subject.unit,
            rank: subject.rank,
            same_rank: subject.same_rank,
            completer: subject.completer,
            percentile: None,
            grade: None,
            error: None,
        }
    }
}

/// Complete grading result for a batch, written as JSON by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct GradeReport {
    pub schema_version: u8,
    pub generated_at: DateTime<Utc>,
    pub table: String,
    pub subjects: Vec<GradedSubject>,
    pub summary: AggregateResult,
    /// Records the loader could not turn into a [`Subject`].
    pub rejected: Vec<SkippedSubject>,
}

use chrono::Utc;
use tracing::debug;

use crate::error::{AggregateError, ConfigError, GradeError};
use crate::grading::aggregate::summarize;
use crate::grading::grade::grade;
use crate::grading::table::{GradeTable, Scale};
use crate::grading::types::{AggregateResult, GradeReport, GradedSubject, Subject};
use crate::grading::validate::validate_rank;

/// Grades subjects against one boundary table.
///
/// The engine holds no per-call state; every method is a pure function of
/// its table and arguments.
#[derive(Debug, Clone)]
pub struct GradeEngine {
    table: GradeTable,
}

impl GradeEngine {
    pub fn new(scale: Scale) -> Self {
        Self::with_table(scale.table())
    }

    /// Builds an engine from a scale selector such as `"9"` or `"5"`.
    pub fn from_selector(selector: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(selector.parse()?))
    }

    pub fn with_table(table: GradeTable) -> Self {
        GradeEngine { table }
    }

    pub fn table(&self) -> &GradeTable {
        &self.table
    }

    /// Grades a single subject.
    ///
    /// # Errors
    ///
    /// [`GradeError::Validation`] for a bad rank record,
    /// [`GradeError::Calculation`] when the table cannot produce a grade.
    pub fn grade_subject(&self, subject: &Subject) -> Result<u8, GradeError> {
        self.grade_with_percentile(subject).map(|(_, g)| g)
    }

    fn grade_with_percentile(&self, subject: &Subject) -> Result<(f64, u8), GradeError> {
        validate_rank(subject.rank, subject.same_rank, subject.completer)?;
        let (percentile, g) = grade(
            &self.table,
            subject.rank,
            subject.same_rank,
            subject.completer,
        )
        .map_err(|source| GradeError::calculation(&subject.name, source))?;
        debug!(subject = %subject.name, percentile, grade = g, "Graded subject");
        Ok((percentile, g))
    }

    /// Averages the grades of every subject that can be graded.
    pub fn average_grade(&self, subjects: &[Subject]) -> Result<AggregateResult, AggregateError> {
        let outcomes: Vec<_> = subjects
            .iter()
            .map(|s| (s.name.as_str(), self.grade_subject(s)))
            .collect();
        summarize(&outcomes)
    }

    /// Range descriptions for the active table, best grade first.
    pub fn grade_boundaries(&self) -> Vec<String> {
        self.table.describe()
    }

    /// Grades a batch into a full report: one row per subject plus the summary.
    pub fn report(&self, subjects: &[Subject]) -> Result<GradeReport, AggregateError> {
        let mut rows = Vec::with_capacity(subjects.len());
        let mut outcomes = Vec::with_capacity(subjects.len());

        for subject in subjects {
            let outcome = self.grade_with_percentile(subject);
            rows.push(match &outcome {
                Ok((percentile, g)) => GradedSubject::from_grade(subject, *percentile, *g),
                Err(e) => GradedSubject::from_error(subject, e),
            });
            outcomes.push((subject.name.as_str(), outcome.map(|(_, g)| g)));
        }

        Ok(GradeReport {
            schema_version: 1,
            generated_at: Utc::now(),
            table: self.table.name().to_string(),
            subjects: rows,
            summary: summarize(&outcomes)?,
            rejected: Vec::new(),
        })
    }
}

use tracing::{info, warn};

use crate::error::{AggregateError, GradeError};
use crate::grading::types::{AggregateResult, SkippedSubject};
use crate::grading::utility::rounded_mean;

/// Folds per-subject outcomes into an [`AggregateResult`].
///
/// A failed subject is recorded in `skipped` and never stops the fold. The
/// batch only fails when it is empty or when no subject produced a grade.
pub fn summarize(
    outcomes: &[(&str, Result<u8, GradeError>)],
) -> Result<AggregateResult, AggregateError> {
    if outcomes.is_empty() {
        return Err(AggregateError::NoSubjects);
    }

    let mut sum: u64 = 0;
    let mut count: usize = 0;
    let mut skipped = Vec::new();

    for (name, outcome) in outcomes {
        match outcome {
            Ok(grade) => {
                sum += u64::from(*grade);
                count += 1;
            }
            Err(e) => {
                warn!(subject = %name, error = %e, "Skipping subject");
                skipped.push(SkippedSubject::from_grade_error(name, e));
            }
        }
    }

    if count == 0 {
        return Err(AggregateError::NoValidGrades { skipped });
    }

    let average = rounded_mean(sum, count as u64);
    info!(
        average,
        graded = count,
        skipped = skipped.len(),
        "Aggregated grades"
    );

    Ok(AggregateResult {
        average,
        graded_count: count,
        skipped,
    })
}

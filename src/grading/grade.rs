use crate::error::CalculationError;
use crate::grading::table::GradeTable;

/// Percentile position of a rank record, in `(0, 100]` for valid input.
///
/// Tied students all take the bottom position of their tie block:
/// rank 1 in a three-way tie is treated as position 3.
pub fn percentile(rank: i64, same_rank: i64, completer: i64) -> f64 {
    let position = rank + same_rank - 1;
    position as f64 * 100.0 / completer as f64
}

/// Converts an already validated rank record into a grade.
pub fn grade(
    table: &GradeTable,
    rank: i64,
    same_rank: i64,
    completer: i64,
) -> Result<(f64, u8), CalculationError> {
    let p = percentile(rank, same_rank, completer);
    Ok((p, table.lookup(p)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::table::Scale;

    #[test]
    fn test_percentile_uses_bottom_of_tie_block() {
        assert_eq!(percentile(1, 1, 100), 1.0);
        assert_eq!(percentile(1, 3, 100), 3.0);
        assert_eq!(percentile(10, 5, 50), 28.0);
    }

    #[test]
    fn test_percentile_stays_in_range() {
        for completer in 1..=60 {
            for rank in 1..=completer {
                for same_rank in 1..=(completer - rank + 1) {
                    let p = percentile(rank, same_rank, completer);
                    assert!(p > 0.0 && p <= 100.0, "{rank}/{same_rank}/{completer} -> {p}");
                }
            }
        }
    }

    #[test]
    fn test_grade_is_monotonic_in_rank() {
        for scale in [Scale::Nine, Scale::Five] {
            let table = scale.table();
            for completer in [1, 7, 25, 99, 100, 337] {
                let mut previous = 0;
                for rank in 1..=completer {
                    let (_, g) = grade(&table, rank, 1, completer).unwrap();
                    assert!(g >= previous, "{scale} tier, rank {rank} of {completer}");
                    previous = g;
                }
            }
        }
    }

    #[test]
    fn test_exact_boundary_positions() {
        let table = Scale::Nine.table();
        assert_eq!(grade(&table, 89, 1, 100), Ok((89.0, 7)));
        assert_eq!(grade(&table, 96, 1, 100), Ok((96.0, 8)));
        assert_eq!(grade(&table, 100, 1, 100), Ok((100.0, 9)));

        let table = Scale::Five.table();
        assert_eq!(grade(&table, 90, 1, 100), Ok((90.0, 4)));
        assert_eq!(grade(&table, 100, 1, 100), Ok((100.0, 5)));
    }
}

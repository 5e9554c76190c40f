use crate::error::ValidationError;

/// Checks a rank record. Checks run in a fixed order and the first failure
/// is returned, so the same bad record always yields the same message.
pub fn validate_rank(rank: i64, same_rank: i64, completer: i64) -> Result<(), ValidationError> {
    if completer <= 0 {
        return Err(ValidationError::NonPositiveCohort);
    }
    if rank <= 0 {
        return Err(ValidationError::NonPositiveRank);
    }
    if same_rank <= 0 {
        return Err(ValidationError::NonPositiveTieCount);
    }
    if rank > completer {
        return Err(ValidationError::RankExceedsCohort);
    }
    if same_rank > completer - rank + 1 {
        return Err(ValidationError::TieCountExceedsRemaining);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_check_has_its_own_message() {
        let cases = [
            ((1, 1, 0), "cohort size must be positive"),
            ((0, 1, 100), "rank must be positive"),
            ((1, 0, 100), "tie-count must be positive"),
            ((101, 1, 100), "rank cannot exceed cohort size"),
            ((1, 101, 100), "tie-count cannot exceed remaining cohort members"),
        ];
        for ((rank, same_rank, completer), message) in cases {
            let err = validate_rank(rank, same_rank, completer).unwrap_err();
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn test_first_failing_check_wins() {
        // Everything is wrong; the cohort check comes first.
        assert_eq!(
            validate_rank(-1, -1, -1),
            Err(ValidationError::NonPositiveCohort)
        );
        // Rank and tie are both non-positive; rank is reported.
        assert_eq!(
            validate_rank(0, 0, 10),
            Err(ValidationError::NonPositiveRank)
        );
        // Rank exceeds cohort, which also leaves no room for the tie.
        assert_eq!(
            validate_rank(11, 5, 10),
            Err(ValidationError::RankExceedsCohort)
        );
    }

    #[test]
    fn test_tie_block_may_reach_last_place() {
        assert_eq!(validate_rank(98, 3, 100), Ok(()));
        assert_eq!(
            validate_rank(98, 4, 100),
            Err(ValidationError::TieCountExceedsRemaining)
        );
        assert_eq!(validate_rank(1, 1, 1), Ok(()));
    }
}

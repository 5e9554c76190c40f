/// Mean of `count` integer grades summing to `sum`, rounded half-up to two
/// decimal places. Rounds in integer hundredths so ties such as 1.025 are
/// not lost to binary fractions. Returns 0.0 when `count` is zero.
pub fn rounded_mean(sum: u64, count: u64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let hundredths = (sum * 200 + count) / (2 * count);
    hundredths as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_mean() {
        assert_eq!(rounded_mean(0, 0), 0.0);
        assert_eq!(rounded_mean(3, 2), 1.5);
        assert_eq!(rounded_mean(2, 3), 0.67);
        assert_eq!(rounded_mean(4, 3), 1.33);
        assert_eq!(rounded_mean(9, 8), 1.13);
    }

    #[test]
    fn test_rounded_mean_breaks_exact_ties_upward() {
        // 41/40 = 1.025 and 201/200 = 1.005 are not exact in f64.
        assert_eq!(rounded_mean(41, 40), 1.03);
        assert_eq!(rounded_mean(201, 200), 1.01);
        assert_eq!(rounded_mean(1003, 200), 5.02);
    }
}

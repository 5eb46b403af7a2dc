//! Cent rounding for display and final totals.

/// Rounds to two decimal places, halves away from zero.
///
/// The decision is made on the exact binary value, so `1.005` (stored just
/// below 1.005) rounds down while `0.125` (stored exactly) rounds up.
///
/// # Examples
///
/// ```
/// use tip_distributor::calculation::round2;
///
/// assert_eq!(round2(3.3333333), 3.33);
/// assert_eq!(round2(0.125), 0.13);
/// assert_eq!(round2(1.005), 1.0);
/// ```
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    // Exact ties only exist for multiples of 1/8.
    let scaled = value * 100.0;
    if (value * 8.0).fract() == 0.0 && scaled.fract().abs() == 0.5 {
        return scaled.round() / 100.0;
    }

    format!("{value:.2}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_to_nearest_cent() {
        assert_eq!(round2(2.344), 2.34);
        assert_eq!(round2(2.346), 2.35);
        assert_eq!(round2(10.0 / 3.0), 3.33);
        assert_eq!(round2(20.0 / 3.0), 6.67);
    }

    #[test]
    fn test_exact_halves_round_up() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(2.625), 2.63);
    }

    #[test]
    fn test_inexact_halves_follow_stored_value() {
        assert_eq!(round2(1.005), 1.0);
        assert_eq!(round2(8.345), 8.35);
    }

    #[test]
    fn test_whole_and_zero_values_are_unchanged() {
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(5.0), 5.0);
        assert_eq!(round2(7.5), 7.5);
    }

    #[test]
    fn test_negative_halves_round_away_from_zero() {
        assert_eq!(round2(-0.125), -0.13);
    }
}

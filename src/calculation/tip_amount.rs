//! Tip amount parsing.
//!
//! Order exports put whatever the point-of-sale printed in the tip column.
//! Amounts are read from the leading numeric portion of the value, so
//! `"4.50 USD"` reads as `4.5` while `"$4.50"` does not read at all.

/// Reads the leading decimal number of `raw`.
///
/// Leading whitespace is skipped. Accepts an optional sign, digits with an
/// optional fraction, an optional exponent, or the literal `Infinity`.
/// Anything after the longest numeric prefix is ignored.
pub fn parse_leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            end = 1;
            true
        }
        Some(b'+') => {
            end = 1;
            false
        }
        _ => false,
    };

    if s[end..].starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    s[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Parses a tip amount, accepting only finite values greater than zero.
///
/// # Examples
///
/// ```
/// use tip_distributor::calculation::parse_tip_amount;
///
/// assert_eq!(parse_tip_amount("10.00"), Some(10.0));
/// assert_eq!(parse_tip_amount("3.25 (card)"), Some(3.25));
/// assert_eq!(parse_tip_amount("0"), None);
/// assert_eq!(parse_tip_amount("$5"), None);
/// ```
pub fn parse_tip_amount(raw: &str) -> Option<f64> {
    parse_leading_number(raw).filter(|amount| amount.is_finite() && *amount > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_decimal() {
        assert_eq!(parse_leading_number("12.75"), Some(12.75));
    }

    #[test]
    fn test_leading_whitespace_and_sign() {
        assert_eq!(parse_leading_number("  +4"), Some(4.0));
        assert_eq!(parse_leading_number("\t-2.5"), Some(-2.5));
    }

    #[test]
    fn test_trailing_text_is_ignored() {
        assert_eq!(parse_leading_number("4.50 USD"), Some(4.5));
        assert_eq!(parse_leading_number("1,234.50"), Some(1.0));
        assert_eq!(parse_leading_number("7."), Some(7.0));
    }

    #[test]
    fn test_fraction_without_integer_part() {
        assert_eq!(parse_leading_number(".5"), Some(0.5));
        assert_eq!(parse_leading_number("."), None);
    }

    #[test]
    fn test_exponent_requires_digits() {
        assert_eq!(parse_leading_number("2e2"), Some(200.0));
        assert_eq!(parse_leading_number("2e"), Some(2.0));
        assert_eq!(parse_leading_number("2e+"), Some(2.0));
    }

    #[test]
    fn test_non_numeric_values() {
        assert_eq!(parse_leading_number(""), None);
        assert_eq!(parse_leading_number("$3.00"), None);
        assert_eq!(parse_leading_number("N/A"), None);
        assert_eq!(parse_leading_number("-"), None);
    }

    #[test]
    fn test_infinity_literal() {
        assert_eq!(parse_leading_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_leading_number("-Infinity"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_tip_amount_rejects_zero_negative_and_infinite() {
        assert_eq!(parse_tip_amount("0.00"), None);
        assert_eq!(parse_tip_amount("-1.00"), None);
        assert_eq!(parse_tip_amount("Infinity"), None);
    }

    #[test]
    fn test_tip_amount_accepts_small_positive() {
        assert_eq!(parse_tip_amount("0.01"), Some(0.01));
    }
}

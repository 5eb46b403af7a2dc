//! Shorthand time suffix normalization.
//!
//! Timesheet exports often abbreviate the day period to a single letter
//! (`9:30a`, `5:00p`). This module expands those suffixes so the value can be
//! parsed by the accepted date/time formats.

use std::borrow::Cow;

/// Expands a trailing `a`/`p` day-period shorthand to ` AM`/` PM`.
///
/// The value is trimmed and lowercased before the suffix check. Values that
/// do not end in the shorthand (including ones already carrying `AM`/`PM`)
/// are returned untouched in their original casing. Empty input is returned
/// as-is.
///
/// # Examples
///
/// ```
/// use tip_distributor::calculation::normalize_time;
///
/// assert_eq!(normalize_time("9:30a"), "9:30 AM");
/// assert_eq!(normalize_time(" 5:00P "), "5:00 PM");
/// assert_eq!(normalize_time("5:00 PM"), "5:00 PM");
/// assert_eq!(normalize_time(""), "");
/// ```
pub fn normalize_time(time: &str) -> Cow<'_, str> {
    if time.is_empty() {
        return Cow::Borrowed(time);
    }

    let lowered = time.trim().to_lowercase();
    if let Some(stem) = lowered.strip_suffix('p') {
        return Cow::Owned(format!("{stem} PM"));
    }
    if let Some(stem) = lowered.strip_suffix('a') {
        return Cow::Owned(format!("{stem} AM"));
    }

    Cow::Borrowed(time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_trailing_p_becomes_pm() {
        assert_eq!(normalize_time("11:45p"), "11:45 PM");
    }

    #[test]
    fn test_trailing_a_becomes_am() {
        assert_eq!(normalize_time("7:05a"), "7:05 AM");
    }

    #[test]
    fn test_shorthand_is_case_insensitive_and_trimmed() {
        assert_eq!(normalize_time("  7:05A\t"), "7:05 AM");
    }

    #[test]
    fn test_full_suffix_keeps_original_casing_and_spacing() {
        assert_eq!(normalize_time(" 7:05 Am "), " 7:05 Am ");
    }

    #[test]
    fn test_plain_24_hour_time_is_untouched() {
        assert_eq!(normalize_time("17:30"), "17:30");
    }

    #[test]
    fn test_empty_value_is_borrowed_unchanged() {
        assert!(matches!(normalize_time(""), Cow::Borrowed("")));
    }

    #[test]
    fn test_whitespace_only_value_is_returned_unchanged() {
        assert_eq!(normalize_time("   "), "   ");
    }

    #[test]
    fn test_shorthand_expansion_lowercases_the_rest() {
        // The whole value is lowercased before the suffix is replaced.
        assert_eq!(normalize_time("NOONp"), "noon PM");
    }

    proptest! {
        #[test]
        fn prop_normalized_shorthand_is_stable(h in 1u32..=12, m in 0u32..60, pm in any::<bool>()) {
            let raw = format!("{}:{:02}{}", h, m, if pm { "p" } else { "a" });
            let once = normalize_time(&raw).into_owned();
            let twice = normalize_time(&once).into_owned();
            prop_assert_eq!(once, twice);
        }
    }
}

//! Clock-in/clock-out timestamp resolution for timesheet rows.
//!
//! A timesheet may store the clock times either as full timestamps or as a
//! time of day next to a separate shift date column. Clock values are
//! resolved by trying an ordered list of [`ClockStrategy`] values.

use chrono::NaiveDateTime;

use crate::models::{Record, TimesheetColumns};

use super::datetime_parsing::{ParseOptions, parse_date_time};
use super::time_normalization::normalize_time;

/// One way of turning a clock column into a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStrategy {
    /// The clock value alone is a full timestamp.
    Standalone,
    /// The clock value is a time of day on the shift date column.
    OnShiftDate,
}

/// Strategies used when matching orders against shifts, in priority order.
pub const MATCHING_CLOCK_STRATEGIES: [ClockStrategy; 2] =
    [ClockStrategy::Standalone, ClockStrategy::OnShiftDate];

/// Strategies used when totalling worked hours.
pub const HOURS_CLOCK_STRATEGIES: [ClockStrategy; 1] = [ClockStrategy::OnShiftDate];

/// Which clock column of a shift to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// The clock-in column.
    In,
    /// The clock-out column.
    Out,
}

/// A shift's resolved working window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftWindow {
    /// When the employee clocked in.
    pub clock_in: NaiveDateTime,
    /// When the employee clocked out.
    pub clock_out: NaiveDateTime,
}

impl ShiftWindow {
    /// Returns true if `at` lies within the window, bounds included.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.clock_in <= at && at <= self.clock_out
    }

    /// Whole minutes worked, truncated. Negative if clock-out precedes clock-in.
    pub fn duration_minutes(&self) -> i64 {
        (self.clock_out - self.clock_in).num_minutes()
    }
}

impl ClockStrategy {
    fn apply(self, time: &str, shift_date: &str, options: &ParseOptions) -> Option<NaiveDateTime> {
        match self {
            ClockStrategy::Standalone => parse_date_time(time, "", options),
            ClockStrategy::OnShiftDate => parse_date_time(shift_date, time, options),
        }
    }
}

/// Resolves one clock column of `shift` using the first strategy that parses.
///
/// The clock value is normalized before parsing. A missing clock column is
/// unresolvable.
pub fn resolve_clock(
    shift: &Record,
    columns: &TimesheetColumns,
    clock: Clock,
    strategies: &[ClockStrategy],
    options: &ParseOptions,
) -> Option<NaiveDateTime> {
    let column = match clock {
        Clock::In => &columns.clock_in_time,
        Clock::Out => &columns.clock_out_time,
    };
    let time = normalize_time(shift.get(column)?);
    let shift_date = shift.get(&columns.clock_in_date).unwrap_or("");

    strategies
        .iter()
        .find_map(|strategy| strategy.apply(&time, shift_date, options))
}

/// Resolves both clock columns of `shift`.
///
/// Returns `None` if either clock cannot be parsed. The window is not
/// checked for ordering.
pub fn resolve_window(
    shift: &Record,
    columns: &TimesheetColumns,
    strategies: &[ClockStrategy],
    options: &ParseOptions,
) -> Option<ShiftWindow> {
    let clock_in = resolve_clock(shift, columns, Clock::In, strategies, options)?;
    let clock_out = resolve_clock(shift, columns, Clock::Out, strategies, options)?;
    Some(ShiftWindow {
        clock_in,
        clock_out,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_mapping;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn shift(date: &str, clock_in: &str, clock_out: &str) -> Record {
        Record::from_pairs([
            ("Employee", "Alice"),
            ("Shift Date", date),
            ("Clock In", clock_in),
            ("Clock Out", clock_out),
        ])
    }

    #[test]
    fn test_matching_strategies_try_standalone_first() {
        assert_eq!(
            MATCHING_CLOCK_STRATEGIES,
            [ClockStrategy::Standalone, ClockStrategy::OnShiftDate]
        );
    }

    #[test]
    fn test_time_of_day_falls_back_to_shift_date() {
        let columns = sample_mapping().timesheet;
        let row = shift("01/01/2024", "9:00a", "5:30p");
        let window = resolve_window(&row, &columns, &MATCHING_CLOCK_STRATEGIES, &ParseOptions::default());
        assert_eq!(
            window,
            Some(ShiftWindow {
                clock_in: at(9, 0),
                clock_out: at(17, 30)
            })
        );
    }

    #[test]
    fn test_full_timestamp_clock_ignores_shift_date() {
        let columns = sample_mapping().timesheet;
        let row = shift("12/25/2023", "01/01/2024 9:00 AM", "01/01/2024 5:00 PM");
        let window =
            resolve_window(&row, &columns, &MATCHING_CLOCK_STRATEGIES, &ParseOptions::default())
                .unwrap();
        assert_eq!(window.clock_in, at(9, 0));
        assert_eq!(window.clock_out, at(17, 0));
    }

    #[test]
    fn test_hours_strategy_does_not_accept_full_timestamp_clock() {
        let columns = sample_mapping().timesheet;
        let row = shift("01/01/2024", "01/01/2024 9:00 AM", "01/01/2024 5:00 PM");
        let window = resolve_window(&row, &columns, &HOURS_CLOCK_STRATEGIES, &ParseOptions::default());
        assert_eq!(window, None);
    }

    #[test]
    fn test_missing_clock_column_is_unresolvable() {
        let columns = sample_mapping().timesheet;
        let row = Record::from_pairs([("Employee", "Alice"), ("Shift Date", "01/01/2024"), ("Clock In", "9:00 AM")]);
        let options = ParseOptions::default();
        assert!(resolve_clock(&row, &columns, Clock::In, &MATCHING_CLOCK_STRATEGIES, &options).is_some());
        assert_eq!(resolve_clock(&row, &columns, Clock::Out, &MATCHING_CLOCK_STRATEGIES, &options), None);
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let window = ShiftWindow {
            clock_in: at(11, 0),
            clock_out: at(13, 0),
        };
        assert!(window.contains(at(11, 0)));
        assert!(window.contains(at(13, 0)));
        assert!(!window.contains(at(13, 1)));
        assert!(!window.contains(at(10, 59)));
    }

    #[test]
    fn test_duration_truncates_to_whole_minutes() {
        let clock_in = at(9, 0);
        let clock_out = clock_in + chrono::Duration::seconds(90 * 60 + 59);
        let window = ShiftWindow { clock_in, clock_out };
        assert_eq!(window.duration_minutes(), 90);
    }
}

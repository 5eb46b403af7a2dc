//! Worked hours per employee.
//!
//! Hours are reported alongside each payout. Only shifts whose clock times
//! parse on the shift date and whose clock-out is after clock-in count.

use std::collections::HashMap;

use crate::models::{Record, TimesheetColumns};

use super::datetime_parsing::ParseOptions;
use super::shift_window::{HOURS_CLOCK_STRATEGIES, resolve_window};

/// Totals worked hours per employee across valid shifts.
///
/// Shifts without an employee name, with an unparseable clock time, or with
/// clock-out not strictly after clock-in contribute nothing. Durations are
/// counted in whole minutes. Totals are unrounded.
///
/// # Examples
///
/// ```
/// use tip_distributor::calculation::{aggregate_shift_hours, ParseOptions};
/// use tip_distributor::models::{Record, TimesheetColumns};
///
/// let columns = TimesheetColumns {
///     employee_name: "Name".to_string(),
///     clock_in_date: "Date".to_string(),
///     clock_in_time: "In".to_string(),
///     clock_out_time: "Out".to_string(),
/// };
/// let shifts = vec![Record::from_pairs([
///     ("Name", "Alice"),
///     ("Date", "01/01/2024"),
///     ("In", "9:00a"),
///     ("Out", "1:30p"),
/// ])];
///
/// let hours = aggregate_shift_hours(&shifts, &columns, &ParseOptions::default());
/// assert_eq!(hours["Alice"], 4.5);
/// ```
pub fn aggregate_shift_hours(
    shifts: &[Record],
    columns: &TimesheetColumns,
    options: &ParseOptions,
) -> HashMap<String, f64> {
    let mut hours: HashMap<String, f64> = HashMap::new();

    for shift in shifts {
        let Some(employee) = shift.get_non_empty(&columns.employee_name) else {
            continue;
        };
        let Some(window) = resolve_window(shift, columns, &HOURS_CLOCK_STRATEGIES, options) else {
            continue;
        };
        if window.clock_out <= window.clock_in {
            continue;
        }

        *hours.entry(employee.to_string()).or_insert(0.0) += window.duration_minutes() as f64 / 60.0;
    }

    hours
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_mapping;

    fn shift(name: &str, date: &str, clock_in: &str, clock_out: &str) -> Record {
        Record::from_pairs([
            ("Employee", name),
            ("Shift Date", date),
            ("Clock In", clock_in),
            ("Clock Out", clock_out),
        ])
    }

    fn hours_for(shifts: &[Record]) -> HashMap<String, f64> {
        aggregate_shift_hours(shifts, &sample_mapping().timesheet, &ParseOptions::default())
    }

    #[test]
    fn test_hours_accumulate_across_shifts() {
        let hours = hours_for(&[
            shift("Alice", "01/01/2024", "9:00 AM", "1:00 PM"),
            shift("Alice", "01/02/2024", "5:00 PM", "7:30 PM"),
            shift("Bob", "01/01/2024", "10:00 AM", "11:15 AM"),
        ]);
        assert_eq!(hours["Alice"], 6.5);
        assert_eq!(hours["Bob"], 1.25);
    }

    #[test]
    fn test_shorthand_times_are_normalized() {
        let hours = hours_for(&[shift("Alice", "01/01/2024", "11:00a", "2:00p")]);
        assert_eq!(hours["Alice"], 3.0);
    }

    #[test]
    fn test_nameless_shift_is_skipped() {
        let hours = hours_for(&[shift("", "01/01/2024", "9:00 AM", "5:00 PM")]);
        assert!(hours.is_empty());
    }

    #[test]
    fn test_unparseable_clock_is_skipped() {
        let hours = hours_for(&[shift("Alice", "01/01/2024", "9ish", "5:00 PM")]);
        assert!(hours.is_empty());
    }

    #[test]
    fn test_clock_out_must_follow_clock_in() {
        // Overnight shift recorded on a single date ends before it starts.
        let hours = hours_for(&[
            shift("Alice", "01/01/2024", "10:00 PM", "2:00 AM"),
            shift("Bob", "01/01/2024", "9:00 AM", "9:00 AM"),
        ]);
        assert!(hours.is_empty());
    }

    #[test]
    fn test_full_timestamp_clock_values_do_not_count_hours() {
        let hours = hours_for(&[shift(
            "Alice",
            "01/01/2024",
            "01/01/2024 9:00 AM",
            "01/01/2024 5:00 PM",
        )]);
        assert!(hours.is_empty());
    }

    #[test]
    fn test_twenty_four_hour_clock_values() {
        let hours = hours_for(&[shift("Alice", "01/01/2024", "08:00", "16:45")]);
        assert_eq!(hours["Alice"], 8.75);
    }
}

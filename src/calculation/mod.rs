//! Calculation logic for the tip distributor.
//!
//! This module contains the allocation engine: shorthand time normalization,
//! multi-format timestamp parsing, shift window resolution, worked hours,
//! order filtering, tip splitting, and the final payout aggregation.

mod datetime_parsing;
mod distribution;
mod order_filter;
mod result_aggregation;
mod rounding;
mod shift_hours;
mod shift_window;
mod time_normalization;
mod tip_allocation;
mod tip_amount;

pub use datetime_parsing::{
    ACCEPTED_FORMATS, DEFAULT_REFERENCE_YEAR, DateTimeFormat, ParseOptions, accepted_formats,
    match_format, parse_date_time,
};
pub use distribution::calculate_tip_distribution;
pub use order_filter::{is_order_filtered_out, rule_excludes};
pub use result_aggregation::{aggregate_results, locale_compare};
pub use rounding::round2;
pub use shift_hours::aggregate_shift_hours;
pub use shift_window::{
    Clock, ClockStrategy, HOURS_CLOCK_STRATEGIES, MATCHING_CLOCK_STRATEGIES, ShiftWindow,
    resolve_clock, resolve_window,
};
pub use time_normalization::normalize_time;
pub use tip_allocation::{Allocation, AllocationDiagnostics, EmployeeTips, allocate_tips};
pub use tip_amount::{parse_leading_number, parse_tip_amount};

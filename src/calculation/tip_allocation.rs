//! Tip allocation across employees on shift.
//!
//! Each order's tip is split evenly between every employee whose shift
//! window contains the order timestamp. Running totals keep the exact
//! (unrounded) shares; display rounding happens only on [`TipDetail::tip_share`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{ColumnMapping, FilterRule, Record, TipDetail, UNKNOWN_ORDER_ID};

use super::datetime_parsing::{ParseOptions, parse_date_time};
use super::order_filter::is_order_filtered_out;
use super::rounding::round2;
use super::shift_window::{MATCHING_CLOCK_STRATEGIES, ShiftWindow, resolve_window};
use super::tip_amount::parse_tip_amount;

/// Running tip totals for one employee.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeTips {
    /// Sum of the exact shares received.
    pub total: f64,
    /// Every allocated order this employee shares, in order-file order.
    pub tips: Vec<Arc<TipDetail>>,
}

/// Counters describing what happened to each order and shift check.
///
/// `unparsed_orders` and `unparsed_shift_checks` are the parse
/// diagnostics. The remaining counters are informational.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocationDiagnostics {
    /// Orders dropped because their timestamp did not parse.
    pub unparsed_orders: usize,
    /// Order-to-shift comparisons skipped because a clock time did not parse.
    pub unparsed_shift_checks: usize,
    /// Orders excluded by a filter rule.
    pub filtered_orders: usize,
    /// Orders dropped because the tip was missing, zero, or not a number.
    pub invalid_tip_orders: usize,
    /// Orders dropped because nobody was on shift.
    pub unmatched_orders: usize,
    /// Orders whose tip was split.
    pub allocated_orders: usize,
}

/// The outcome of allocating every order.
#[derive(Debug, Clone, Default)]
pub struct Allocation {
    /// Running totals keyed by employee name.
    pub employees: HashMap<String, EmployeeTips>,
    /// What happened along the way.
    pub diagnostics: AllocationDiagnostics,
}

struct Candidate<'a> {
    employee: Option<&'a str>,
    window: Option<ShiftWindow>,
}

/// Allocates every order's tip to the employees on shift at the order time.
///
/// Orders are dropped when a filter rule excludes them, when the tip is not
/// a finite amount above zero, when the timestamp does not parse, or when no
/// one was working. When the mapping uses the same column for order date
/// and time, that column is parsed as a full timestamp.
///
/// Shift clock values are tried first as full timestamps and then as times
/// on the shift date. A shift whose clock values cannot be resolved is
/// skipped for every order, and each skip is counted.
pub fn allocate_tips(
    orders: &[Record],
    shifts: &[Record],
    mapping: &ColumnMapping,
    rules: &[FilterRule],
    options: &ParseOptions,
) -> Allocation {
    let order_columns = &mapping.orders;
    let timesheet_columns = &mapping.timesheet;

    let candidates: Vec<Candidate<'_>> = shifts
        .iter()
        .map(|shift| Candidate {
            employee: shift.get_non_empty(&timesheet_columns.employee_name),
            window: resolve_window(shift, timesheet_columns, &MATCHING_CLOCK_STRATEGIES, options),
        })
        .collect();
    let unresolved_shifts = candidates.iter().filter(|c| c.window.is_none()).count();

    let mut allocation = Allocation::default();
    let diagnostics = &mut allocation.diagnostics;

    for order in orders {
        if is_order_filtered_out(order, rules) {
            diagnostics.filtered_orders += 1;
            continue;
        }

        let Some(tip_amount) = order.get(&order_columns.tip_amount).and_then(parse_tip_amount) else {
            diagnostics.invalid_tip_orders += 1;
            continue;
        };

        let time = if mapping.order_time_is_embedded() {
            Some("")
        } else {
            order.get(&order_columns.time)
        };
        let date = order.get(&order_columns.date).unwrap_or("");
        let Some(ordered_at) = time.and_then(|time| parse_date_time(date, time, options)) else {
            diagnostics.unparsed_orders += 1;
            continue;
        };

        diagnostics.unparsed_shift_checks += unresolved_shifts;

        let working: Vec<String> = candidates
            .iter()
            .filter(|c| c.window.is_some_and(|w| w.contains(ordered_at)))
            .filter_map(|c| c.employee.map(str::to_string))
            .collect();

        if working.is_empty() {
            diagnostics.unmatched_orders += 1;
            continue;
        }

        let share = tip_amount / working.len() as f64;
        let detail = Arc::new(TipDetail {
            order_id: order
                .get_non_empty(&order_columns.order_id)
                .unwrap_or(UNKNOWN_ORDER_ID)
                .to_string(),
            order_total_tip: tip_amount,
            tip_share: round2(share),
            shared_with: working,
        });

        for employee in &detail.shared_with {
            let entry = allocation.employees.entry(employee.clone()).or_default();
            entry.total += share;
            entry.tips.push(Arc::clone(&detail));
        }
        diagnostics.allocated_orders += 1;
    }

    allocation
}

//! Tip distribution entry point.
//!
//! Ties the components together: worked hours from the timesheet, tip
//! allocation over the filtered orders, then the final payout list.

use tracing::{debug, warn};

use crate::models::{ColumnMapping, EmployeePayout, FilterRule, Record};

use super::datetime_parsing::ParseOptions;
use super::result_aggregation::aggregate_results;
use super::shift_hours::aggregate_shift_hours;
use super::tip_allocation::{AllocationDiagnostics, allocate_tips};

/// Distributes order tips among the employees on shift when each order was placed.
///
/// Returns one payout per employee who received any tip, sorted by name.
/// Malformed rows never fail the computation: they are skipped, and parse
/// failures are reported as warnings.
///
/// # Example
///
/// ```
/// use tip_distributor::calculation::{calculate_tip_distribution, ParseOptions};
/// use tip_distributor::models::{ColumnMapping, OrderColumns, Record, TimesheetColumns};
///
/// let mapping = ColumnMapping {
///     orders: OrderColumns {
///         order_id: "Id".to_string(),
///         date: "Date".to_string(),
///         time: "Time".to_string(),
///         tip_amount: "Tip".to_string(),
///     },
///     timesheet: TimesheetColumns {
///         employee_name: "Name".to_string(),
///         clock_in_date: "Date".to_string(),
///         clock_in_time: "In".to_string(),
///         clock_out_time: "Out".to_string(),
///     },
/// };
/// let orders = vec![Record::from_pairs([
///     ("Id", "1"),
///     ("Date", "01/01/2024"),
///     ("Time", "12:00 PM"),
///     ("Tip", "10.00"),
/// ])];
/// let shifts = vec![
///     Record::from_pairs([("Name", "Alice"), ("Date", "01/01/2024"), ("In", "11:00 AM"), ("Out", "01:00 PM")]),
///     Record::from_pairs([("Name", "Bob"), ("Date", "01/01/2024"), ("In", "11:30 AM"), ("Out", "12:30 PM")]),
/// ];
///
/// let payouts = calculate_tip_distribution(&orders, &shifts, &mapping, &[], &ParseOptions::default());
/// assert_eq!(payouts.len(), 2);
/// assert_eq!(payouts[0].employee_name, "Alice");
/// assert_eq!(payouts[0].total_amount, 5.0);
/// assert_eq!(payouts[1].total_amount, 5.0);
/// ```
pub fn calculate_tip_distribution(
    orders: &[Record],
    shifts: &[Record],
    mapping: &ColumnMapping,
    filters: &[FilterRule],
    options: &ParseOptions,
) -> Vec<EmployeePayout> {
    let hours = aggregate_shift_hours(shifts, &mapping.timesheet, options);
    let allocation = allocate_tips(orders, shifts, mapping, filters, options);

    report_diagnostics(&allocation.diagnostics);

    let payouts = aggregate_results(allocation.employees, &hours);
    debug!(
        orders = orders.len(),
        shifts = shifts.len(),
        payouts = payouts.len(),
        "Tip distribution complete"
    );
    payouts
}

fn report_diagnostics(diagnostics: &AllocationDiagnostics) {
    if diagnostics.unparsed_orders > 0 {
        warn!(
            skipped = diagnostics.unparsed_orders,
            "Skipped {} orders due to unrecognized date/time format",
            diagnostics.unparsed_orders
        );
    }
    if diagnostics.unparsed_shift_checks > 0 {
        warn!(
            skipped = diagnostics.unparsed_shift_checks,
            "Skipped {} total shift checks due to unrecognized date/time format",
            diagnostics.unparsed_shift_checks
        );
    }
    debug!(
        allocated = diagnostics.allocated_orders,
        filtered = diagnostics.filtered_orders,
        invalid_tip = diagnostics.invalid_tip_orders,
        unmatched = diagnostics.unmatched_orders,
        "Order allocation summary"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FilterOperator, sample_mapping};
    use proptest::prelude::*;

    fn order(id: &str, tip: &str, time: &str) -> Record {
        Record::from_pairs([("Order ID", id), ("Tip", tip), ("Date", "01/01/2024"), ("Time", time)])
    }

    fn shift(name: &str, clock_in: &str, clock_out: &str) -> Record {
        Record::from_pairs([
            ("Employee", name),
            ("Shift Date", "01/01/2024"),
            ("Clock In", clock_in),
            ("Clock Out", clock_out),
        ])
    }

    fn distribute(orders: &[Record], shifts: &[Record], filters: &[FilterRule]) -> Vec<EmployeePayout> {
        calculate_tip_distribution(orders, shifts, &sample_mapping(), filters, &ParseOptions::default())
    }

    #[test]
    fn test_lunch_rush_scenario() {
        let orders = [order("1001", "10.00", "12:00 PM")];
        let shifts = [
            shift("Bob", "11:30 AM", "12:30 PM"),
            shift("Alice", "11:00 AM", "01:00 PM"),
        ];

        let payouts = distribute(&orders, &shifts, &[]);
        assert_eq!(payouts.len(), 2);
        assert_eq!(payouts[0].employee_name, "Alice");
        assert_eq!(payouts[1].employee_name, "Bob");
        for payout in &payouts {
            assert_eq!(payout.total_amount, 5.0);
            assert_eq!(payout.tips.len(), 1);
            assert_eq!(payout.tips[0].tip_share, 5.0);
            assert_eq!(payout.tips[0].shared_with, vec!["Bob", "Alice"]);
        }
        assert_eq!(payouts[0].total_hours, 2.0);
        assert_eq!(payouts[1].total_hours, 1.0);
    }

    #[test]
    fn test_hours_only_employee_is_not_paid_out() {
        let orders = [order("1", "4.00", "9:00 AM")];
        let shifts = [
            shift("Alice", "8:00 AM", "10:00 AM"),
            shift("Bob", "2:00 PM", "6:00 PM"),
        ];

        let payouts = distribute(&orders, &shifts, &[]);
        assert_eq!(payouts.len(), 1);
        assert_eq!(payouts[0].employee_name, "Alice");
    }

    #[test]
    fn test_unmatched_orders_do_not_affect_totals() {
        let shifts = [shift("Alice", "8:00 AM", "10:00 AM")];
        let matched = [order("1", "4.00", "9:00 AM")];
        let with_unmatched = [order("1", "4.00", "9:00 AM"), order("2", "50.00", "11:00 PM")];

        assert_eq!(distribute(&matched, &shifts, &[]), distribute(&with_unmatched, &shifts, &[]));
    }

    #[test]
    fn test_relay_orders_filtered_by_is_rule() {
        let mut relay = order("1", "4.00", "9:00 AM");
        relay.insert("source", "Relay");
        let mut walk_in = order("2", "2.00", "9:00 AM");
        walk_in.insert("source", "Counter");
        let shifts = [shift("Alice", "8:00 AM", "10:00 AM")];
        let rules = [FilterRule::new("source", FilterOperator::Is, "relay")];

        let payouts = distribute(&[relay, walk_in], &shifts, &rules);
        assert_eq!(payouts[0].total_amount, 2.0);
        assert_eq!(payouts[0].tips[0].order_id, "2");
    }

    #[test]
    fn test_no_orders_yields_empty_payouts() {
        let shifts = [shift("Alice", "8:00 AM", "10:00 AM")];
        assert!(distribute(&[], &shifts, &[]).is_empty());
    }

    #[test]
    fn test_identical_inputs_give_identical_output() {
        let orders = [
            order("1", "7.00", "9:00 AM"),
            order("2", "3.10", "9:30 AM"),
            order("3", "1.00", "9:45 AM"),
        ];
        let shifts = [
            shift("Alice", "8:00 AM", "10:00 AM"),
            shift("Bob", "9:15 AM", "11:00 AM"),
            shift("Cy", "9:40 AM", "9:50 AM"),
        ];

        let first = serde_json::to_string(&distribute(&orders, &shifts, &[])).unwrap();
        let second = serde_json::to_string(&distribute(&orders, &shifts, &[])).unwrap();
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn prop_total_is_rounded_sum_of_exact_shares(
            tips in proptest::collection::vec(1u32..10_000, 1..12),
            workers in 1usize..5,
        ) {
            let shifts: Vec<Record> = (0..workers)
                .map(|i| shift(&format!("W{i}"), "8:00 AM", "6:00 PM"))
                .collect();
            let orders: Vec<Record> = tips
                .iter()
                .enumerate()
                .map(|(i, cents)| order(&i.to_string(), &format!("{}.{:02}", cents / 100, cents % 100), "12:00 PM"))
                .collect();

            let payouts = distribute(&orders, &shifts, &[]);
            for payout in &payouts {
                let exact: f64 = payout.tips.iter().map(|t| t.unrounded_share()).sum();
                prop_assert_eq!(payout.total_amount, crate::calculation::round2(exact));

                let displayed: f64 = payout.tips.iter().map(|t| t.tip_share).sum();
                let drift_bound = 0.005 * (payout.tips.len() + 1) as f64 + 1e-9;
                prop_assert!((payout.total_amount - displayed).abs() <= drift_bound);
            }
        }
    }
}

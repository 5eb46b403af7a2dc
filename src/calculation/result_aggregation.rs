//! Final payout assembly.
//!
//! Turns the allocator's running totals and the per-employee hours into the
//! sorted payout list returned to callers.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::models::EmployeePayout;

use super::rounding::round2;
use super::tip_allocation::EmployeeTips;

/// Compares names the way a person reading a list expects.
///
/// Names are decomposed (NFD) and compared in three passes: base letters
/// case-insensitively, then accents, then case with lowercase first. Remaining
/// ties fall back to code point order.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use tip_distributor::calculation::locale_compare;
///
/// assert_eq!(locale_compare("alice", "Bob"), Ordering::Less);
/// assert_eq!(locale_compare("ann", "Ann"), Ordering::Less);
/// assert_eq!(locale_compare("Émile", "Eve"), Ordering::Less);
/// ```
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let (left, right) = (collation_units(a), collation_units(b));

    let primary = left
        .iter()
        .flat_map(|unit| unit.base.to_lowercase())
        .cmp(right.iter().flat_map(|unit| unit.base.to_lowercase()));

    primary
        .then_with(|| {
            left.iter()
                .map(|unit| &unit.marks)
                .cmp(right.iter().map(|unit| &unit.marks))
        })
        .then_with(|| case_order(&left, &right))
        .then_with(|| a.cmp(b))
}

/// A base character and the combining marks that follow it.
struct CollationUnit {
    base: char,
    marks: Vec<char>,
}

fn collation_units(name: &str) -> Vec<CollationUnit> {
    let mut units: Vec<CollationUnit> = Vec::new();
    for c in name.nfd() {
        match units.last_mut() {
            Some(unit) if is_combining_mark(c) => unit.marks.push(c),
            _ => units.push(CollationUnit {
                base: c,
                marks: Vec::new(),
            }),
        }
    }
    units
}

fn case_order(a: &[CollationUnit], b: &[CollationUnit]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x.base, y.base))
        .find(|(x, y)| x != y)
        .map_or(Ordering::Equal, |(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => Ordering::Equal,
        })
}

/// Builds the payout list from allocated tips and worked hours.
///
/// Only employees who received at least one tip appear. Totals and hours
/// are rounded to two decimals here and nowhere earlier. Employees who tipped
/// out but have no valid shift hours report `0` hours.
pub fn aggregate_results(
    employees: HashMap<String, EmployeeTips>,
    hours: &HashMap<String, f64>,
) -> Vec<EmployeePayout> {
    let mut payouts: Vec<EmployeePayout> = employees
        .into_iter()
        .filter(|(_, tips)| !tips.tips.is_empty())
        .map(|(name, tips)| EmployeePayout {
            total_amount: round2(tips.total),
            total_hours: round2(hours.get(&name).copied().unwrap_or(0.0)),
            tips: tips.tips.into_iter().map(Arc::unwrap_or_clone).collect(),
            employee_name: name,
        })
        .collect();

    payouts.sort_by(|a, b| locale_compare(&a.employee_name, &b.employee_name));
    payouts
}

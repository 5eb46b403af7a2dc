//! Rule-based order exclusion.

use crate::models::{FilterOperator, FilterRule, Record};

/// Returns true if `rule` excludes `order`.
///
/// Rules on a column the order does not carry never exclude. Comparison is
/// case-insensitive.
pub fn rule_excludes(order: &Record, rule: &FilterRule) -> bool {
    let Some(order_value) = order.get(&rule.field) else {
        return false;
    };
    let order_value = order_value.to_lowercase();
    let rule_value = rule.value.to_lowercase();

    match rule.operator {
        FilterOperator::Contains => order_value.contains(&rule_value),
        FilterOperator::DoesNotContain => !order_value.contains(&rule_value),
        FilterOperator::Is => order_value == rule_value,
        FilterOperator::IsNot => order_value != rule_value,
        FilterOperator::Unrecognized => false,
    }
}

/// Returns true if any rule excludes `order`.
///
/// Every operator names the condition under which an order is *dropped*:
/// `is` drops orders equal to the value, `is_not` drops all others.
///
/// # Examples
///
/// ```
/// use tip_distributor::calculation::is_order_filtered_out;
/// use tip_distributor::models::{FilterOperator, FilterRule, Record};
///
/// let order = Record::from_pairs([("source", "Relay")]);
/// let rules = [FilterRule::new("source", FilterOperator::Is, "relay")];
/// assert!(is_order_filtered_out(&order, &rules));
/// ```
pub fn is_order_filtered_out(order: &Record, rules: &[FilterRule]) -> bool {
    rules.iter().any(|rule| rule_excludes(order, rule))
}

//! Filter rules applied to orders before allocation.

use serde::{Deserialize, Serialize};

/// Comparison applied by a [`FilterRule`].
///
/// Every operator describes when an order is *excluded*.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    /// Exclude when the order value equals the rule value.
    Is,
    /// Exclude when the order value differs from the rule value.
    IsNot,
    /// Exclude when the order value contains the rule value.
    Contains,
    /// Exclude when the order value does not contain the rule value.
    DoesNotContain,
    /// Any other operator string. Never excludes.
    #[serde(other)]
    Unrecognized,
}

/// A caller-supplied predicate over one order column.
///
/// # Example
///
/// ```
/// use tip_distributor::models::{FilterOperator, FilterRule};
///
/// let rule: FilterRule =
///     serde_json::from_str(r#"{"field": "source", "operator": "is", "value": "relay"}"#).unwrap();
/// assert_eq!(rule.operator, FilterOperator::Is);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRule {
    /// Order column the rule inspects.
    pub field: String,
    /// Comparison to apply.
    pub operator: FilterOperator,
    /// Value compared against, case-insensitively.
    pub value: String,
}

impl FilterRule {
    /// Creates a new filter rule.
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

//! Payout models produced by a tip distribution.
//!
//! This module contains [`TipDetail`], one record per allocated order, and
//! [`EmployeePayout`], the per-employee result the engine returns.

use serde::{Deserialize, Serialize};

/// Order identifier used when the order carries none.
pub const UNKNOWN_ORDER_ID: &str = "N/A";

/// The allocation of a single order's tip.
///
/// One `TipDetail` is created per allocated order and shared by every
/// employee the tip was split between.
///
/// # Example
///
/// ```
/// use tip_distributor::models::TipDetail;
///
/// let detail = TipDetail {
///     order_id: "1001".to_string(),
///     order_total_tip: 10.0,
///     tip_share: 5.0,
///     shared_with: vec!["Alice".to_string(), "Bob".to_string()],
/// };
/// assert_eq!(detail.split_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipDetail {
    /// The order identifier, or `"N/A"`.
    pub order_id: String,
    /// The full tip recorded on the order.
    pub order_total_tip: f64,
    /// Each employee's share, rounded to cents for display.
    pub tip_share: f64,
    /// Every employee the tip was split between, in timesheet order.
    pub shared_with: Vec<String>,
}

impl TipDetail {
    /// Number of employees the tip was split between.
    pub fn split_count(&self) -> usize {
        self.shared_with.len()
    }

    /// The exact share each employee accrued, before display rounding.
    pub fn unrounded_share(&self) -> f64 {
        self.order_total_tip / self.shared_with.len() as f64
    }
}

/// The total tips owed to one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayout {
    /// The employee name as found in the timesheet.
    pub employee_name: String,
    /// Sum of unrounded shares, rounded to cents once.
    pub total_amount: f64,
    /// Hours worked across valid shifts, rounded to two decimals.
    pub total_hours: f64,
    /// Every order this employee received a share of.
    pub tips: Vec<TipDetail>,
}

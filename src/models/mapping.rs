//! Column mapping between logical engine fields and file columns.

use serde::{Deserialize, Serialize};

/// Columns of the orders file the engine reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderColumns {
    /// Column holding the order identifier.
    pub order_id: String,
    /// Column holding the order date (or the full timestamp).
    pub date: String,
    /// Column holding the order time of day.
    pub time: String,
    /// Column holding the tip amount.
    pub tip_amount: String,
}

/// Columns of the timesheet file the engine reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetColumns {
    /// Column holding the employee name.
    pub employee_name: String,
    /// Column holding the shift date.
    pub clock_in_date: String,
    /// Column holding the clock-in time.
    pub clock_in_time: String,
    /// Column holding the clock-out time.
    pub clock_out_time: String,
}

/// Caller-supplied association between engine fields and file columns.
///
/// # Example
///
/// ```
/// use tip_distributor::models::ColumnMapping;
///
/// let json = r#"{
///     "orders": {"orderId": "Id", "date": "Created", "time": "Created", "tipAmount": "Tip"},
///     "timesheet": {
///         "employeeName": "Name",
///         "clockInDate": "Date",
///         "clockInTime": "In",
///         "clockOutTime": "Out"
///     }
/// }"#;
///
/// let mapping: ColumnMapping = serde_json::from_str(json).unwrap();
/// assert!(mapping.order_time_is_embedded());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Order file columns.
    pub orders: OrderColumns,
    /// Timesheet file columns.
    pub timesheet: TimesheetColumns,
}

impl ColumnMapping {
    /// Returns true when the order date and time map to the same column.
    ///
    /// In that case the date column already carries the full timestamp and
    /// the time component is treated as absent.
    pub fn order_time_is_embedded(&self) -> bool {
        self.orders.date == self.orders.time
    }

    /// Order columns that must be non-empty for a row to reach the engine.
    pub fn required_order_columns(&self) -> [&str; 2] {
        [&self.orders.tip_amount, &self.orders.date]
    }

    /// Timesheet columns that must be non-empty for a row to reach the engine.
    pub fn required_timesheet_columns(&self) -> [&str; 2] {
        [&self.timesheet.employee_name, &self.timesheet.clock_in_time]
    }
}

#[cfg(test)]
pub(crate) fn sample_mapping() -> ColumnMapping {
    ColumnMapping {
        orders: OrderColumns {
            order_id: "Order ID".to_string(),
            date: "Date".to_string(),
            time: "Time".to_string(),
            tip_amount: "Tip".to_string(),
        },
        timesheet: TimesheetColumns {
            employee_name: "Employee".to_string(),
            clock_in_date: "Shift Date".to_string(),
            clock_in_time: "Clock In".to_string(),
            clock_out_time: "Clock Out".to_string(),
        },
    }
}

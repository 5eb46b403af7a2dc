//! Core data models for the tip distributor.
//!
//! This module contains all the domain models used throughout the engine.

mod filter;
mod mapping;
mod payout;
mod record;

pub use filter::{FilterOperator, FilterRule};
pub use mapping::{ColumnMapping, OrderColumns, TimesheetColumns};
pub use payout::{EmployeePayout, TipDetail, UNKNOWN_ORDER_ID};
pub use record::Record;

#[cfg(test)]
pub(crate) use mapping::sample_mapping;

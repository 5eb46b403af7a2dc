//! Tabular file ingestion.
//!
//! Uploaded orders and timesheets are CSV files with a header row. This
//! module turns them into [`Record`](crate::models::Record)s and drops rows
//! that lack the columns the engine requires.

mod cleaning;
mod reader;

pub use cleaning::{CleaningSummary, retain_complete};
pub use reader::{read_records, read_records_from_bytes};

//! HTTP API module for the tip distributor.
//!
//! This module provides the REST endpoints that accept uploaded orders and
//! timesheet files and return the computed tip payouts.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    FILTERS_FIELD, MAPPINGS_FIELD, ORDERS_FILE_FIELD, ProcessForm, ProcessRequest,
    TIMESHEET_FILE_FIELD,
};
pub use response::{ApiError, ApiErrorResponse, HealthResponse};
pub use state::AppState;

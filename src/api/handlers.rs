//! HTTP request handlers for the tip distributor API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{ParseOptions, calculate_tip_distribution};
use crate::error::{EngineError, EngineResult};
use crate::models::EmployeePayout;

use super::request::ProcessForm;
use super::response::{ApiErrorResponse, HealthResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
///
/// Request bodies are capped at the configured `max_upload_bytes`.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config().max_upload_bytes;
    Router::new()
        .route("/api/process", post(process_handler))
        .route("/api/health", get(health_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handler for GET /api/health.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Handler for POST /api/process.
///
/// Accepts the orders and timesheet uploads with their column mapping and
/// filter rules, and returns the per-employee payouts.
async fn process_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Received request to /api/process");

    let start_time = Instant::now();
    match process(&state, multipart, correlation_id).await {
        Ok(payouts) => {
            info!(
                correlation_id = %correlation_id,
                employees = payouts.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Calculation complete"
            );
            (StatusCode::OK, Json(payouts)).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Error during processing"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

async fn process(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
    correlation_id: Uuid,
) -> EngineResult<Vec<EmployeePayout>> {
    let multipart = multipart.map_err(|rejection| EngineError::Multipart {
        message: rejection.body_text(),
    })?;

    let form = ProcessForm::from_multipart(multipart, state.config().max_upload_bytes).await?;
    let options = *state.parse_options();

    // CSV reading and the orders x shifts scan are CPU-bound.
    tokio::task::spawn_blocking(move || run_calculation(form, &options, correlation_id))
        .await
        .map_err(|err| EngineError::CalculationTask {
            message: err.to_string(),
        })?
}

fn run_calculation(
    form: ProcessForm,
    options: &ParseOptions,
    correlation_id: Uuid,
) -> EngineResult<Vec<EmployeePayout>> {
    let request = form.into_request()?;

    info!(
        correlation_id = %correlation_id,
        orders = request.order_counts.original,
        timesheets = request.timesheet_counts.original,
        "Initial parse"
    );
    info!(
        correlation_id = %correlation_id,
        valid_orders = request.order_counts.retained,
        valid_timesheets = request.timesheet_counts.retained,
        "After cleaning"
    );

    Ok(calculate_tip_distribution(
        &request.orders,
        &request.timesheet,
        &request.mapping,
        &request.filters,
        options,
    ))
}

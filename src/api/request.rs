//! Request types for the tip distributor API.
//!
//! This module reads the `multipart/form-data` body of `/api/process` and
//! turns it into engine inputs.

use axum::body::Bytes;
use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{EngineError, EngineResult};
use crate::models::{ColumnMapping, FilterRule, Record};
use crate::tabular::{CleaningSummary, read_records_from_bytes, retain_complete};

/// Form field carrying the orders CSV file.
pub const ORDERS_FILE_FIELD: &str = "ordersFile";
/// Form field carrying the timesheet CSV file.
pub const TIMESHEET_FILE_FIELD: &str = "timesheetFile";
/// Form field carrying the column mapping JSON.
pub const MAPPINGS_FIELD: &str = "mappings";
/// Form field carrying the filter rule JSON array.
pub const FILTERS_FIELD: &str = "filters";

/// Raw fields of a `/api/process` upload.
///
/// Only the first occurrence of each field is kept; unknown fields are
/// ignored.
#[derive(Debug, Clone, Default)]
pub struct ProcessForm {
    /// Orders file contents.
    pub orders_file: Option<Bytes>,
    /// Timesheet file contents.
    pub timesheet_file: Option<Bytes>,
    /// Column mapping JSON text.
    pub mappings: Option<String>,
    /// Filter rules JSON text.
    pub filters: Option<String>,
}

/// Engine inputs decoded from a [`ProcessForm`].
#[derive(Debug, Clone)]
pub struct ProcessRequest {
    /// Cleaned order rows.
    pub orders: Vec<Record>,
    /// Cleaned timesheet rows.
    pub timesheet: Vec<Record>,
    /// Column mapping.
    pub mapping: ColumnMapping,
    /// Exclusion rules.
    pub filters: Vec<FilterRule>,
    /// Order rows before and after cleaning.
    pub order_counts: CleaningSummary,
    /// Timesheet rows before and after cleaning.
    pub timesheet_counts: CleaningSummary,
}

impl ProcessForm {
    /// Drains a multipart stream into a form.
    ///
    /// `limit` is the configured body limit, reported when the stream is cut
    /// off for exceeding it.
    pub async fn from_multipart(mut multipart: Multipart, limit: usize) -> EngineResult<Self> {
        let to_engine_error = |e: MultipartError| multipart_error(e, limit);
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(to_engine_error)? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match name.as_str() {
                ORDERS_FILE_FIELD if form.orders_file.is_none() => {
                    form.orders_file = Some(field.bytes().await.map_err(to_engine_error)?);
                }
                TIMESHEET_FILE_FIELD if form.timesheet_file.is_none() => {
                    form.timesheet_file = Some(field.bytes().await.map_err(to_engine_error)?);
                }
                MAPPINGS_FIELD if form.mappings.is_none() => {
                    form.mappings = Some(field.text().await.map_err(to_engine_error)?);
                }
                FILTERS_FIELD if form.filters.is_none() => {
                    form.filters = Some(field.text().await.map_err(to_engine_error)?);
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// Validates the form and decodes it into engine inputs.
    ///
    /// Both files must be present before anything else is examined. The JSON
    /// fields are decoded next, then the CSV files are read and cleaned of
    /// rows missing required columns.
    pub fn into_request(self) -> EngineResult<ProcessRequest> {
        let (Some(orders_file), Some(timesheet_file)) = (self.orders_file, self.timesheet_file)
        else {
            return Err(EngineError::MissingUpload);
        };

        let mapping: ColumnMapping = parse_json_field(MAPPINGS_FIELD, self.mappings.as_deref())?;
        let filters: Vec<FilterRule> = parse_json_field(FILTERS_FIELD, self.filters.as_deref())?;

        let mut orders = read_records_from_bytes("orders", &orders_file)?;
        let mut timesheet = read_records_from_bytes("timesheet", &timesheet_file)?;

        let order_counts = retain_complete(&mut orders, &mapping.required_order_columns());
        let timesheet_counts = retain_complete(&mut timesheet, &mapping.required_timesheet_columns());

        Ok(ProcessRequest {
            orders,
            timesheet,
            mapping,
            filters,
            order_counts,
            timesheet_counts,
        })
    }
}

fn parse_json_field<T: DeserializeOwned>(field: &str, text: Option<&str>) -> EngineResult<T> {
    let text = text.ok_or_else(|| EngineError::MalformedPayload {
        field: field.to_string(),
        message: "field is missing".to_string(),
    })?;

    serde_json::from_str(text).map_err(|e| EngineError::MalformedPayload {
        field: field.to_string(),
        message: e.to_string(),
    })
}

fn multipart_error(error: MultipartError, limit: usize) -> EngineError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        EngineError::UploadTooLarge { limit }
    } else {
        EngineError::Multipart {
            message: error.body_text(),
        }
    }
}

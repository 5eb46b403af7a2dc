//! Response types for the tip distributor API.
//!
//! This module defines the error response structures and the mapping from
//! [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates the error returned when an upload is missing.
    pub fn missing_files() -> Self {
        Self::new("MISSING_FILES", EngineError::MissingUpload.to_string())
    }

    /// Creates the catch-all processing error.
    pub fn processing_error(cause: impl std::fmt::Display) -> Self {
        Self::new(
            "PROCESSING_ERROR",
            format!("An error occurred on the server: {cause}"),
        )
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the service is answering.
    pub status: String,
    /// Crate version.
    pub version: String,
}

impl HealthResponse {
    /// A healthy response carrying this build's version.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::MissingUpload => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::missing_files(),
            },
            EngineError::Multipart { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "MALFORMED_MULTIPART",
                    "Request must be multipart/form-data",
                    message,
                ),
            },
            error @ EngineError::UploadTooLarge { .. } => ApiErrorResponse {
                status: StatusCode::PAYLOAD_TOO_LARGE,
                error: ApiError::with_details(
                    "PAYLOAD_TOO_LARGE",
                    error.to_string(),
                    "Split the files or raise max_upload_bytes",
                ),
            },
            other => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::processing_error(other),
            },
        }
    }
}

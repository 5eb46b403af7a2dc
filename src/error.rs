//! Error types for the tip distributor.
//!
//! The allocation engine itself never fails: malformed rows are skipped.
//! These errors cover the layers around it (configuration, file ingestion
//! and request payloads) using the `thiserror` crate.

use thiserror::Error;

/// The main error type for the tip distributor.
///
/// # Example
///
/// ```
/// use tip_distributor::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/server.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/server.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was out of range or malformed.
    #[error("Invalid configuration value '{key}': {message}")]
    InvalidConfig {
        /// The setting that was invalid.
        key: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// An uploaded tabular file could not be read.
    #[error("Failed to read {source_name} file: {message}")]
    TabularParse {
        /// Which upload failed (e.g. "orders").
        source_name: String,
        /// A description of the parse error.
        message: String,
    },

    /// A JSON form field (mappings or filters) was missing or malformed.
    #[error("Invalid '{field}' payload: {message}")]
    MalformedPayload {
        /// The form field that was malformed.
        field: String,
        /// A description of the parse error.
        message: String,
    },

    /// One or both required file uploads were missing.
    #[error("Both orders and timesheet files are required.")]
    MissingUpload,

    /// The multipart request body could not be read.
    #[error("Malformed multipart request: {message}")]
    Multipart {
        /// A description of the multipart error.
        message: String,
    },

    /// The request body exceeded the configured upload limit.
    #[error("Upload exceeds the {limit} byte limit")]
    UploadTooLarge {
        /// The configured limit in bytes.
        limit: usize,
    },

    /// The blocking calculation task panicked or was cancelled.
    #[error("Calculation task failed: {message}")]
    CalculationTask {
        /// A description of the task failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

//! Response types for the care shift engine API.
//!
//! This module defines the error response structures, the mapping from
//! [`EngineError`] to HTTP statuses, and the batch-generation response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::Shift;
use crate::scheduling::{weekday_name, SkippedDefinition};

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

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
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
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::TimeParse { value } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Malformed time-of-day string: '{}'", value),
                    "Times of day must be formatted as HH:MM and weekdays as lowercase names",
                ),
            },
            EngineError::Validation { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(message),
            },
            EngineError::NotFound { entity, id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("NOT_FOUND", format!("{} {} not found", entity, id)),
            },
            EngineError::Conflict { message } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("CONFLICT", message),
            },
            EngineError::Storage { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("STORAGE_ERROR", "Storage failure", message),
            },
        }
    }
}

/// One skipped definition in a generation response, echoed back in wire
/// form together with the reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedDefinitionResponse {
    /// Lowercase weekday names of the skipped template.
    pub days: Vec<String>,
    /// Daily start of the coverage window, `"HH:MM"`.
    pub start_time: String,
    /// Daily end of the coverage window, `"HH:MM"`.
    pub end_time: String,
    /// Why the definition was skipped.
    pub error: String,
}

impl From<SkippedDefinition> for SkippedDefinitionResponse {
    fn from(skipped: SkippedDefinition) -> Self {
        SkippedDefinitionResponse {
            days: skipped
                .definition
                .days
                .iter()
                .map(|d| weekday_name(*d).to_string())
                .collect(),
            start_time: skipped.definition.start_time.format("%H:%M").to_string(),
            end_time: skipped.definition.end_time.format("%H:%M").to_string(),
            error: skipped.error,
        }
    }
}

/// Response body for `POST /care-plans/{plan_id}/shifts/generate`.
///
/// Generation is partial-success: created shifts and skipped definitions
/// are reported side by side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Shifts persisted successfully, in definition order.
    pub created: Vec<Shift>,
    /// Definitions that could not be expanded, with reasons.
    pub skipped: Vec<SkippedDefinitionResponse>,
}

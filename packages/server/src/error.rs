use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

use crate::analytics::RangeError;

/// A single failing field in a request payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct FieldError {
    /// Name of the offending field as it appears in the request.
    #[schema(example = "rating")]
    pub field: String,
    #[schema(example = "Rating must be an integer between 1 and 5")]
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Always `false`.
    #[schema(example = false)]
    pub success: bool,
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `NOT_FOUND`,
    /// `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Validation failed")]
    pub error: String,
    /// Per-field failures. Present on validation errors only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// Malformed request that is not tied to a particular payload field.
    Validation(String),
    /// Payload failed field validation.
    InvalidPayload(Vec<FieldError>),
    NotFound(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    success: false,
                    code: "VALIDATION_ERROR",
                    error: msg,
                    details: Some(Vec::new()),
                },
            ),
            AppError::InvalidPayload(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    success: false,
                    code: "VALIDATION_ERROR",
                    error: "Validation failed".into(),
                    details: Some(errors),
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    success: false,
                    code: "NOT_FOUND",
                    error: msg,
                    details: None,
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        success: false,
                        code: "INTERNAL_ERROR",
                        error: "An unexpected error occurred".into(),
                        details: None,
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<RangeError> for AppError {
    fn from(err: RangeError) -> Self {
        AppError::Validation(err.to_string())
    }
}

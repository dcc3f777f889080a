//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use topweight_shared::errors::{NameError, RecordError};
use topweight_shared::types::{ErrorDetail, ErrorResponse};
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Validation failure tied to a single input field
    #[error("Invalid {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The store rejected a write; the caller keeps its input and may retry
    #[error("Save failed")]
    SaveFailed(#[source] anyhow::Error),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidField { .. } | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::SaveFailed(_) | ApiError::Internal(_) | ApiError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        ApiError::InvalidField {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<NameError> for ApiError {
    fn from(err: NameError) -> Self {
        ApiError::InvalidField {
            field: "name".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Report the first offending field
        match errors.field_errors().into_iter().next() {
            Some((field, _)) => ApiError::InvalidField {
                field: field.to_string(),
                message: format!("{} is invalid", field),
            },
            None => ApiError::Validation(errors.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut field = None;
        let mut retryable = false;

        let (code, message) = match self {
            ApiError::Validation(msg) => ("VALIDATION_ERROR", msg),
            ApiError::InvalidField { field: f, message } => {
                field = Some(f);
                ("VALIDATION_ERROR", message)
            }
            ApiError::NotFound(msg) => ("NOT_FOUND", msg),
            ApiError::BadRequest(msg) => ("BAD_REQUEST", msg),
            ApiError::SaveFailed(err) => {
                error!("Save failed: {:?}", err);
                retryable = true;
                ("SAVE_FAILED", "The change could not be saved".to_string())
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                ("INTERNAL_ERROR", "An internal error occurred".to_string())
            }
            ApiError::Database(err) => {
                error!("Database error: {:?}", err);
                ("DATABASE_ERROR", "A database error occurred".to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
                retryable,
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

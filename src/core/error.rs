//! Typed error handling for the HTTP surface
//!
//! Every failure that crosses the HTTP boundary is expressed as an
//! [`ApiError`] and rendered as a JSON body with the matching status code:
//!
//! - validation failure → 400
//! - missing/invalid bearer token → 401
//! - absent entity → 404
//! - duplicate registration → 409
//! - request timeout → 408
//! - storage or other unexpected failure → 500
//!
//! Repositories never produce these directly: absence is signalled with
//! `None`/`false` return values, and only genuine backend failures bubble up
//! as `anyhow::Error`, which handlers convert into the 500 branch.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The error type for all HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request payload failed validation (missing/invalid field)
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid bearer token
    #[error("{0}")]
    Unauthorized(String),

    /// Entity with the requested id does not exist
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    /// Duplicate registration
    #[error("{0}")]
    Conflict(String),

    /// Request exceeded the configured time budget
    #[error("Request timeout")]
    Timeout,

    /// Unexpected failure (storage backend, serialization, ...)
    #[error("{context}")]
    Internal {
        context: String,
        #[source]
        source: anyhow::Error,
    },
}

/// JSON body for error responses.
///
/// Matches the wire shape the SDK expects: `error` always present,
/// `message` only for errors that carry extra detail.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiError {
    /// Shorthand for [`ApiError::NotFound`].
    pub fn not_found(resource: &'static str) -> Self {
        ApiError::NotFound { resource }
    }

    /// Wrap a backend failure with a caller-facing context line.
    pub fn internal(context: impl Into<String>, source: anyhow::Error) -> Self {
        ApiError::Internal {
            context: context.into(),
            source,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to the JSON response body.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            ApiError::Timeout => Some("The request took too long to process".to_string()),
            ApiError::Internal { source, .. } => Some(source.to_string()),
            _ => None,
        };

        ErrorResponse {
            error: self.to_string(),
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(self.to_response())).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal {
            context: "Internal server error".to_string(),
            source: err,
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<&str> = field_errors.keys().map(|k| k.as_ref()).collect();
        fields.sort_unstable();
        ApiError::Validation(format!("Invalid value for field(s): {}", fields.join(", ")))
    }
}

/// A specialized Result type for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

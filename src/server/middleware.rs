//! Request-timeout middleware
//!
//! Wraps the rest of the stack in the configured time budget and replies
//! with the 408 error body when it runs out. The abandoned handler future
//! is dropped at its next await point; the reply to the caller does not
//! wait for it.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::core::ApiError;

use super::AppState;

/// Bound the request with the configured budget, replying 408 on expiry.
pub async fn request_timeout(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    match tokio::time::timeout(state.request_timeout, next.run(request)).await {
        Ok(response) => response,
        Err(_) => ApiError::Timeout.into_response(),
    }
}

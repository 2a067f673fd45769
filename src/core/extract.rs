//! Request/response plumbing shared by all resource handlers
//!
//! [`AppJson`] replaces `axum::Json` for request bodies so that malformed or
//! incomplete payloads are reported as a 400 validation error with the
//! standard JSON error body (the stock extractor replies 422 with plain
//! text). [`ListParams`] and [`ListResponse`] carry the pagination contract
//! of the list endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::{Deserialize, Serialize};

use crate::core::error::ApiError;

/// JSON body extractor that rejects with the 400 validation error.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(ApiError::Validation(rejection.body_text())),
        }
    }
}

/// Query parameters accepted by every list endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListParams {
    pub limit: usize,
    pub offset: usize,
    /// Optional filter for contacts/carts belonging to one account
    pub account_id: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            limit: 100,
            offset: 0,
            account_id: None,
        }
    }
}

/// Pagination echo included in list responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: usize,
    pub offset: usize,
    /// Number of records in this page (not the collection total)
    pub count: usize,
}

/// Envelope for list endpoints: `{data, pagination}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> ListResponse<T> {
    /// Wrap a page of records with the pagination echo.
    pub fn page(data: Vec<T>, params: &ListParams) -> Self {
        let count = data.len();
        Self {
            data,
            pagination: Pagination {
                limit: params.limit,
                offset: params.offset,
                count,
            },
        }
    }
}

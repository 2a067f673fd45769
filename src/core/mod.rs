//! Core abstractions shared across the crate

pub mod error;
pub mod extract;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use extract::{AppJson, ListParams, ListResponse, Pagination};

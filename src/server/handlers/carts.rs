//! Cart endpoints, including the item merge operations

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use validator::Validate;

use crate::core::{ApiError, ApiResult, AppJson, ListParams, ListResponse};
use crate::model::{AddItemInput, Cart, CreateCartInput, RemoveItemInput};
use crate::server::AppState;

pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCartInput>,
) -> ApiResult<(StatusCode, Json<Cart>)> {
    let cart = state
        .service
        .create_cart(input)
        .await
        .map_err(|e| ApiError::internal("Failed to create cart", e))?;

    Ok((StatusCode::CREATED, Json(cart)))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Cart>> {
    let cart = state
        .service
        .get_cart(&id)
        .await
        .map_err(|e| ApiError::internal("Failed to get cart", e))?;

    cart.map(Json).ok_or_else(|| ApiError::not_found("Cart"))
}

/// List carts, optionally filtered to one account via `?accountId=`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<ListResponse<Cart>>> {
    let carts = match &params.account_id {
        Some(account_id) => state
            .service
            .carts_by_account(account_id)
            .await
            .map_err(|e| ApiError::internal("Failed to list carts", e))?,
        None => state
            .service
            .list_carts(params.limit, params.offset)
            .await
            .map_err(|e| ApiError::internal("Failed to list carts", e))?,
    };

    Ok(Json(ListResponse::page(carts, &params)))
}

/// Add (or merge) an item. Quantity and price are validated here, at the
/// aggregate boundary; the merge itself accepts whatever it is given.
pub async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<AddItemInput>,
) -> ApiResult<Json<Cart>> {
    input.validate()?;

    let cart = state
        .service
        .add_to_cart(&id, &input)
        .await
        .map_err(|e| ApiError::internal("Failed to add item to cart", e))?;

    cart.map(Json).ok_or_else(|| ApiError::not_found("Cart"))
}

/// Remove a line. Unknown productIds are a no-op that still bumps
/// `updatedAt`; only an unknown cart id is an error.
pub async fn remove_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<RemoveItemInput>,
) -> ApiResult<Json<Cart>> {
    let cart = state
        .service
        .remove_from_cart(&id, &input)
        .await
        .map_err(|e| ApiError::internal("Failed to remove item from cart", e))?;

    cart.map(Json).ok_or_else(|| ApiError::not_found("Cart"))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let deleted = state
        .service
        .delete_cart(&id)
        .await
        .map_err(|e| ApiError::internal("Failed to delete cart", e))?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Cart"))
    }
}

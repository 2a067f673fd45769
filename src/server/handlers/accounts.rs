//! Account endpoints

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use crate::core::{ApiError, ApiResult, AppJson, ListParams, ListResponse};
use crate::model::{Account, CreateAccountInput, UpdateAccountInput};
use crate::server::AppState;

pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateAccountInput>,
) -> ApiResult<(StatusCode, Json<Account>)> {
    let account = state
        .service
        .create_account(input)
        .await
        .map_err(|e| ApiError::internal("Failed to create account", e))?;

    Ok((StatusCode::CREATED, Json(account)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Account>> {
    let account = state
        .service
        .get_account(&id)
        .await
        .map_err(|e| ApiError::internal("Failed to get account", e))?;

    account.map(Json).ok_or_else(|| ApiError::not_found("Account"))
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<ListResponse<Account>>> {
    let accounts = state
        .service
        .list_accounts(params.limit, params.offset)
        .await
        .map_err(|e| ApiError::internal("Failed to list accounts", e))?;

    Ok(Json(ListResponse::page(accounts, &params)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateAccountInput>,
) -> ApiResult<Json<Account>> {
    let account = state
        .service
        .update_account(&id, input)
        .await
        .map_err(|e| ApiError::internal("Failed to update account", e))?;

    account.map(Json).ok_or_else(|| ApiError::not_found("Account"))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let deleted = state
        .service
        .delete_account(&id)
        .await
        .map_err(|e| ApiError::internal("Failed to delete account", e))?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Account"))
    }
}

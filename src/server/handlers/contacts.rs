//! Contact endpoints

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use crate::core::{ApiError, ApiResult, AppJson, ListParams, ListResponse};
use crate::model::{Contact, CreateContactInput, UpdateContactInput};
use crate::server::AppState;

pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateContactInput>,
) -> ApiResult<(StatusCode, Json<Contact>)> {
    let contact = state
        .service
        .create_contact(input)
        .await
        .map_err(|e| ApiError::internal("Failed to create contact", e))?;

    Ok((StatusCode::CREATED, Json(contact)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Contact>> {
    let contact = state
        .service
        .get_contact(&id)
        .await
        .map_err(|e| ApiError::internal("Failed to get contact", e))?;

    contact.map(Json).ok_or_else(|| ApiError::not_found("Contact"))
}

/// List contacts, optionally filtered to one account via `?accountId=`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<ListResponse<Contact>>> {
    let contacts = match &params.account_id {
        Some(account_id) => state
            .service
            .contacts_by_account(account_id)
            .await
            .map_err(|e| ApiError::internal("Failed to list contacts", e))?,
        None => state
            .service
            .list_contacts(params.limit, params.offset)
            .await
            .map_err(|e| ApiError::internal("Failed to list contacts", e))?,
    };

    Ok(Json(ListResponse::page(contacts, &params)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateContactInput>,
) -> ApiResult<Json<Contact>> {
    let contact = state
        .service
        .update_contact(&id, input)
        .await
        .map_err(|e| ApiError::internal("Failed to update contact", e))?;

    contact.map(Json).ok_or_else(|| ApiError::not_found("Contact"))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let deleted = state
        .service
        .delete_contact(&id)
        .await
        .map_err(|e| ApiError::internal("Failed to delete contact", e))?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Contact"))
    }
}

//! Login and registration endpoints

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::{ApiError, ApiResult, AppJson};
use crate::model::{LoginInput, RegisterInput, UserSummary};
use crate::server::AppState;

/// Body of successful login/register responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
}

/// Register a new user. 409 when the email is already taken.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterInput>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    input
        .validate()
        .map_err(|_| ApiError::Validation("Email and password are required".to_string()))?;

    let existing = state
        .users
        .find_by_email(&input.email)
        .await
        .map_err(|e| ApiError::internal("Registration failed", e))?;
    if existing.is_some() {
        return Err(ApiError::Conflict("User already exists".to_string()));
    }

    let user = state
        .users
        .create(input)
        .await
        .map_err(|e| ApiError::internal("Registration failed", e))?;
    let token = state
        .tokens
        .generate(&user.id, &user.email)
        .map_err(|e| ApiError::internal("Registration failed", e))?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.summary(),
        }),
    ))
}

/// Log an existing user in. 401 for unknown email or wrong password.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginInput>,
) -> ApiResult<Json<AuthResponse>> {
    input
        .validate()
        .map_err(|_| ApiError::Validation("Email and password are required".to_string()))?;

    let user = state
        .users
        .find_by_email(&input.email)
        .await
        .map_err(|e| ApiError::internal("Login failed", e))?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    if user.password != input.password {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = state
        .tokens
        .generate(&user.id, &user.email)
        .map_err(|e| ApiError::internal("Login failed", e))?;

    Ok(Json(AuthResponse {
        token,
        user: UserSummary {
            id: user.id,
            email: user.email,
            name: None,
        },
    }))
}

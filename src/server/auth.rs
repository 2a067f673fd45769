//! Bearer-token issuance and verification
//!
//! Tokens are HS256 JWTs carrying the user id and email. The
//! [`require_auth`] middleware implements the bearer-presence check for
//! protected route groups: it rejects requests without a valid
//! `Authorization: Bearer <token>` header and exposes the verified claims
//! to downstream handlers via request extensions.

use anyhow::{Context, Result};
use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::JwtConfig;
use crate::core::ApiError;

use super::AppState;

/// Claims embedded in issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,
    pub iat: u64,
    pub exp: u64,
}

/// Signs and verifies bearer tokens.
#[derive(Clone)]
pub struct TokenManager {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry: Duration,
}

impl TokenManager {
    /// Build key material from the configured secret.
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            expiry: config.expiry,
        }
    }

    /// Issue a token for the given user.
    pub fn generate(&self, user_id: &str, email: &str) -> Result<String> {
        let now = Utc::now().timestamp() as u64;
        let claims = Claims {
            user_id: user_id.to_string(),
            email: email.to_string(),
            iat: now,
            exp: now + self.expiry.as_secs(),
        };

        encode(&Header::default(), &claims, &self.encoding).context("Failed to sign token")
    }

    /// Verify a token's signature and expiry, returning its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))
    }
}

/// Middleware enforcing bearer-token presence on a route group.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let Some(token) = token else {
        return Err(ApiError::Unauthorized("No token provided".to_string()));
    };

    let claims = state.tokens.verify(token)?;
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

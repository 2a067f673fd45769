//! Health and test-support endpoints

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

use crate::server::AppState;

/// Report service health.
///
/// In memory mode there is nothing external to check. In database mode the
/// storage backend and the cache store are both pinged; any failure turns
/// the whole report unhealthy with a 503.
pub async fn health_check(State(state): State<AppState>) -> Response {
    match check_services(&state).await {
        Ok(services) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "timestamp": Utc::now().to_rfc3339(),
                "services": services,
            })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "timestamp": Utc::now().to_rfc3339(),
                "error": e.to_string(),
            })),
        )
            .into_response(),
    }
}

async fn check_services(state: &AppState) -> anyhow::Result<Value> {
    if state.backend.kind().is_memory() {
        return Ok(json!({ "storage": "memory" }));
    }

    state.backend.ping().await?;
    let mut services = json!({ "database": "connected" });

    if let Some(cache) = &state.cache {
        cache.ping().await?;
        services["redis"] = json!("connected");
    }

    Ok(services)
}

#[derive(Debug, Deserialize)]
pub struct DelayParams {
    #[serde(default = "default_delay_ms")]
    pub ms: u64,
}

fn default_delay_ms() -> u64 {
    1000
}

/// Deliberately slow endpoint for exercising the timeout middleware.
///
/// Only available when the configured environment is `test`; hidden behind
/// a plain 404 everywhere else.
pub async fn test_delay(
    State(state): State<AppState>,
    Query(params): Query<DelayParams>,
) -> Response {
    if !state.test_env {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Not found" })),
        )
            .into_response();
    }

    tokio::time::sleep(Duration::from_millis(params.ms)).await;

    Json(json!({
        "message": "Delayed response",
        "delayMs": params.ms,
        "timestamp": Utc::now().to_rfc3339(),
    }))
    .into_response()
}

//! HTTP exposure: application state, router assembly and the serve loop
//!
//! All dependencies (service facade, user repository, token manager,
//! backend and cache handles) are constructed explicitly at startup and
//! injected into the handlers through [`AppState`] — there is no hidden
//! process-wide state.

pub mod auth;
pub mod handlers;
pub mod middleware;

pub use auth::{Claims, TokenManager, require_auth};

use anyhow::Result;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::cache::Cache;
use crate::config::AppConfig;
use crate::repo::UserRepository;
use crate::service::CrmService;
use crate::storage::Backend;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: CrmService,
    pub users: UserRepository,
    pub tokens: TokenManager,
    pub backend: Backend,
    pub cache: Option<Cache>,
    pub test_env: bool,
    pub request_timeout: Duration,
}

impl AppState {
    /// Wire up the state from configuration and connected resources.
    pub fn new(config: &AppConfig, backend: Backend, cache: Option<Cache>) -> Self {
        Self {
            service: CrmService::new(&backend),
            users: UserRepository::new(&backend),
            tokens: TokenManager::new(&config.jwt),
            backend,
            cache,
            test_env: config.is_test_env(),
            request_timeout: config.request_timeout,
        }
    }
}

/// Assemble the full application router.
pub fn build_router(state: AppState) -> Router {
    let salesforce = Router::new()
        .route(
            "/accounts",
            post(handlers::accounts::create).get(handlers::accounts::list),
        )
        .route(
            "/accounts/{id}",
            get(handlers::accounts::get)
                .put(handlers::accounts::update)
                .patch(handlers::accounts::update)
                .delete(handlers::accounts::remove),
        )
        .route(
            "/contacts",
            post(handlers::contacts::create).get(handlers::contacts::list),
        )
        .route(
            "/contacts/{id}",
            get(handlers::contacts::get)
                .put(handlers::contacts::update)
                .patch(handlers::contacts::update)
                .delete(handlers::contacts::remove),
        )
        .route(
            "/carts",
            post(handlers::carts::create).get(handlers::carts::list),
        )
        .route(
            "/carts/{id}",
            get(handlers::carts::get).delete(handlers::carts::remove),
        )
        .route(
            "/carts/{id}/items",
            post(handlers::carts::add_item).delete(handlers::carts::remove_item),
        );

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/test-delay", get(handlers::health::test_delay))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/register", post(handlers::auth::register))
        .nest("/api/salesforce", salesforce)
        .fallback(not_found)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::request_timeout,
        ))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the router with graceful shutdown on SIGTERM / Ctrl+C.
pub async fn serve(addr: &str, app: Router) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Permissive CORS, matching the original surface.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// JSON 404 for unknown routes.
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not found" })),
    )
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

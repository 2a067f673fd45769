//! # salescart
//!
//! REST backend for Salesforce-style accounts, contacts and shopping carts,
//! plus an SDK client mirroring the same operations over HTTP.
//!
//! ## Features
//!
//! - **Pluggable storage**: one polymorphic collection interface with a
//!   durable MongoDB backend and a process-local in-memory backend,
//!   selected by configuration at startup
//! - **Cart aggregate**: merge-by-productId item semantics with a subtotal
//!   that is recomputed on every mutation
//! - **Explicit wiring**: repositories, service facade and token manager
//!   are constructed at startup and injected into the handlers — no global
//!   singletons
//! - **SDK client**: typed client over reqwest that distinguishes API
//!   errors (status + body) from network errors
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use salescart::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::from_env();
//!     let backend = Backend::connect(&config).await?;
//!     let state = AppState::new(&config, backend, None);
//!
//!     salescart::server::serve(&config.listen_addr(), build_router(state)).await
//! }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod core;
pub mod model;
pub mod repo;
pub mod server;
pub mod service;
pub mod storage;

/// Re-exports of commonly used types
pub mod prelude {
    pub use crate::cache::Cache;
    pub use crate::client::{ClientConfig, ClientError, SalescartClient};
    pub use crate::config::{AppConfig, StorageBackend};
    pub use crate::core::{ApiError, ApiResult, ListParams, ListResponse};
    pub use crate::model::{
        Account, AddItemInput, Cart, CartItem, Contact, CreateAccountInput, CreateCartInput,
        CreateContactInput, LoginInput, RegisterInput, RemoveItemInput, UpdateAccountInput,
        UpdateContactInput, User, UserSummary,
    };
    pub use crate::repo::{AccountRepository, CartRepository, ContactRepository, UserRepository};
    pub use crate::server::{AppState, TokenManager, build_router, require_auth};
    pub use crate::service::CrmService;
    pub use crate::storage::{Backend, Collection, InMemoryStore};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}

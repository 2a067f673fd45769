//! SDK client mirroring the HTTP surface
//!
//! One method per endpoint, sharing the server's own model types. Failures
//! split the way callers need to handle them: a server that answered with a
//! non-2xx status becomes [`ClientError::Api`] carrying the status code and
//! raw JSON body, while a request that never got a response becomes
//! [`ClientError::Network`].
//!
//! ```rust,ignore
//! let client = SalescartClient::new(ClientConfig {
//!     base_url: "http://localhost:3000".to_string(),
//!     ..Default::default()
//! })?;
//!
//! let cart = client.create_cart(&CreateCartInput::default()).await?;
//! let cart = client
//!     .add_to_cart(&cart.id, &AddItemInput {
//!         product_id: "p1".to_string(),
//!         product_name: "Widget".to_string(),
//!         quantity: 2,
//!         price: 10.0,
//!     })
//!     .await?;
//! assert_eq!(cart.subtotal, 20.0);
//! ```

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::core::ListResponse;
use crate::model::{
    Account, AddItemInput, Cart, Contact, CreateAccountInput, CreateCartInput, CreateContactInput,
    RemoveItemInput, UpdateAccountInput, UpdateContactInput,
};

/// SDK configuration.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Server origin, e.g. `http://localhost:3000`
    pub base_url: String,
    /// Optional bearer token attached to every request
    pub api_key: Option<String>,
    /// Per-request timeout (default 30s)
    pub timeout: Option<Duration>,
}

/// Errors surfaced by the SDK.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server responded with a failure status
    #[error("API Error: {status} - {body}")]
    Api {
        status: u16,
        body: serde_json::Value,
    },

    /// No response was received (connect failure, timeout, ...)
    #[error("Network Error: {0}")]
    Network(#[source] reqwest::Error),

    /// The server replied 2xx but the body did not match the expected shape
    #[error("Decode Error: {0}")]
    Decode(#[source] reqwest::Error),

    /// The client could not be constructed from the given configuration
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

/// HTTP client for the salescart API.
#[derive(Debug, Clone)]
pub struct SalescartClient {
    http: reqwest::Client,
    base_url: String,
}

impl SalescartClient {
    /// Build a client from the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &config.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout.unwrap_or(Duration::from_secs(30)))
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode the 2xx JSON body.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await.map_err(ClientError::Network)?;
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(ClientError::Decode)
        } else {
            Err(Self::api_error(status, response).await)
        }
    }

    /// Send a request where success carries no body (204 deletes).
    async fn execute_empty(&self, request: reqwest::RequestBuilder) -> Result<(), ClientError> {
        let response = request.send().await.map_err(ClientError::Network)?;
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            Err(Self::api_error(status, response).await)
        }
    }

    async fn api_error(status: StatusCode, response: reqwest::Response) -> ClientError {
        let body = response
            .json::<serde_json::Value>()
            .await
            .unwrap_or(serde_json::Value::Null);
        ClientError::Api {
            status: status.as_u16(),
            body,
        }
    }

    fn list_query(limit: usize, offset: usize, account_id: Option<&str>) -> Vec<(&'static str, String)> {
        let mut query = vec![("limit", limit.to_string()), ("offset", offset.to_string())];
        if let Some(account_id) = account_id {
            query.push(("accountId", account_id.to_string()));
        }
        query
    }

    // -- Account methods -----------------------------------------------------

    pub async fn create_account(
        &self,
        input: &CreateAccountInput,
    ) -> Result<Account, ClientError> {
        self.execute(self.http.post(self.url("/api/salesforce/accounts")).json(input))
            .await
    }

    pub async fn get_account(&self, id: &str) -> Result<Account, ClientError> {
        self.execute(self.http.get(self.url(&format!("/api/salesforce/accounts/{id}"))))
            .await
    }

    pub async fn list_accounts(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<ListResponse<Account>, ClientError> {
        self.execute(
            self.http
                .get(self.url("/api/salesforce/accounts"))
                .query(&Self::list_query(limit, offset, None)),
        )
        .await
    }

    pub async fn update_account(
        &self,
        id: &str,
        input: &UpdateAccountInput,
    ) -> Result<Account, ClientError> {
        self.execute(
            self.http
                .put(self.url(&format!("/api/salesforce/accounts/{id}")))
                .json(input),
        )
        .await
    }

    pub async fn delete_account(&self, id: &str) -> Result<(), ClientError> {
        self.execute_empty(self.http.delete(self.url(&format!("/api/salesforce/accounts/{id}"))))
            .await
    }

    // -- Contact methods -----------------------------------------------------

    pub async fn create_contact(
        &self,
        input: &CreateContactInput,
    ) -> Result<Contact, ClientError> {
        self.execute(self.http.post(self.url("/api/salesforce/contacts")).json(input))
            .await
    }

    pub async fn get_contact(&self, id: &str) -> Result<Contact, ClientError> {
        self.execute(self.http.get(self.url(&format!("/api/salesforce/contacts/{id}"))))
            .await
    }

    pub async fn list_contacts(
        &self,
        limit: usize,
        offset: usize,
        account_id: Option<&str>,
    ) -> Result<ListResponse<Contact>, ClientError> {
        self.execute(
            self.http
                .get(self.url("/api/salesforce/contacts"))
                .query(&Self::list_query(limit, offset, account_id)),
        )
        .await
    }

    pub async fn contacts_by_account(
        &self,
        account_id: &str,
    ) -> Result<ListResponse<Contact>, ClientError> {
        self.list_contacts(100, 0, Some(account_id)).await
    }

    pub async fn update_contact(
        &self,
        id: &str,
        input: &UpdateContactInput,
    ) -> Result<Contact, ClientError> {
        self.execute(
            self.http
                .put(self.url(&format!("/api/salesforce/contacts/{id}")))
                .json(input),
        )
        .await
    }

    pub async fn delete_contact(&self, id: &str) -> Result<(), ClientError> {
        self.execute_empty(self.http.delete(self.url(&format!("/api/salesforce/contacts/{id}"))))
            .await
    }

    // -- Cart methods --------------------------------------------------------

    pub async fn create_cart(&self, input: &CreateCartInput) -> Result<Cart, ClientError> {
        self.execute(self.http.post(self.url("/api/salesforce/carts")).json(input))
            .await
    }

    pub async fn get_cart(&self, id: &str) -> Result<Cart, ClientError> {
        self.execute(self.http.get(self.url(&format!("/api/salesforce/carts/{id}"))))
            .await
    }

    pub async fn list_carts(
        &self,
        limit: usize,
        offset: usize,
        account_id: Option<&str>,
    ) -> Result<ListResponse<Cart>, ClientError> {
        self.execute(
            self.http
                .get(self.url("/api/salesforce/carts"))
                .query(&Self::list_query(limit, offset, account_id)),
        )
        .await
    }

    pub async fn carts_by_account(
        &self,
        account_id: &str,
    ) -> Result<ListResponse<Cart>, ClientError> {
        self.list_carts(100, 0, Some(account_id)).await
    }

    pub async fn add_to_cart(
        &self,
        cart_id: &str,
        input: &AddItemInput,
    ) -> Result<Cart, ClientError> {
        self.execute(
            self.http
                .post(self.url(&format!("/api/salesforce/carts/{cart_id}/items")))
                .json(input),
        )
        .await
    }

    /// Remove a line from a cart. The productId travels in the DELETE body.
    pub async fn remove_from_cart(
        &self,
        cart_id: &str,
        input: &RemoveItemInput,
    ) -> Result<Cart, ClientError> {
        self.execute(
            self.http
                .delete(self.url(&format!("/api/salesforce/carts/{cart_id}/items")))
                .json(input),
        )
        .await
    }

    pub async fn delete_cart(&self, id: &str) -> Result<(), ClientError> {
        self.execute_empty(self.http.delete(self.url(&format!("/api/salesforce/carts/{id}"))))
            .await
    }
}

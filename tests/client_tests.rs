//! SDK client tests against a live server on an ephemeral port
//!
//! The SDK speaks real HTTP, so these tests bind an actual listener instead
//! of a mock transport.

use std::time::Duration;

use salescart::client::{ClientConfig, ClientError, SalescartClient};
use salescart::config::{AppConfig, StorageBackend};
use salescart::model::{
    AddItemInput, CreateAccountInput, CreateCartInput, CreateContactInput, RemoveItemInput,
    UpdateAccountInput,
};
use salescart::server::{AppState, build_router};
use salescart::storage::{Backend, InMemoryStore};

/// Start a memory-backed server on an ephemeral port, returning its origin.
async fn spawn_server() -> String {
    let config = AppConfig {
        env: "test".to_string(),
        storage_backend: StorageBackend::Memory,
        ..AppConfig::default()
    };
    let state = AppState::new(&config, Backend::Memory(InMemoryStore::new()), None);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

async fn client() -> SalescartClient {
    let base_url = spawn_server().await;
    SalescartClient::new(ClientConfig {
        base_url,
        api_key: None,
        timeout: Some(Duration::from_secs(5)),
    })
    .unwrap()
}

fn account_input(name: &str) -> CreateAccountInput {
    CreateAccountInput {
        name: name.to_string(),
        industry: None,
        account_number: None,
        website: None,
        phone: None,
        billing_address: None,
    }
}

// ---------------------------------------------------------------------------
// Accounts through the SDK
// ---------------------------------------------------------------------------

#[tokio::test]
async fn account_lifecycle_through_sdk() {
    let client = client().await;

    let created = client.create_account(&account_input("Acme")).await.unwrap();
    assert_eq!(created.name, "Acme");

    let fetched = client.get_account(&created.id).await.unwrap();
    assert_eq!(fetched, created);

    let updated = client
        .update_account(
            &created.id,
            &UpdateAccountInput {
                website: Some("https://acme.example".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Acme");
    assert_eq!(updated.website.as_deref(), Some("https://acme.example"));

    client.delete_account(&created.id).await.unwrap();

    let err = client.get_account(&created.id).await.unwrap_err();
    match err {
        ClientError::Api { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body["error"], "Account not found");
        }
        other => panic!("expected Api error, got: {other}"),
    }
}

#[tokio::test]
async fn list_accounts_returns_pagination_envelope() {
    let client = client().await;
    for n in 0..3 {
        client
            .create_account(&account_input(&format!("Account {n}")))
            .await
            .unwrap();
    }

    let page = client.list_accounts(2, 0).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.pagination.limit, 2);
    assert_eq!(page.pagination.count, 2);
}

// ---------------------------------------------------------------------------
// Contacts through the SDK
// ---------------------------------------------------------------------------

#[tokio::test]
async fn contacts_by_account_filter() {
    let client = client().await;

    for (first, account_id) in [("Ada", Some("acct-1")), ("Grace", None)] {
        client
            .create_contact(&CreateContactInput {
                account_id: account_id.map(String::from),
                first_name: first.to_string(),
                last_name: "Tester".to_string(),
                email: None,
                phone: None,
                title: None,
                department: None,
            })
            .await
            .unwrap();
    }

    let page = client.contacts_by_account("acct-1").await.unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].first_name, "Ada");

    let all = client.list_contacts(100, 0, None).await.unwrap();
    assert_eq!(all.data.len(), 2);
}

// ---------------------------------------------------------------------------
// Carts through the SDK
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cart_flow_through_sdk() {
    let client = client().await;

    let cart = client
        .create_cart(&CreateCartInput {
            account_id: Some("acct-1".to_string()),
        })
        .await
        .unwrap();
    assert!(cart.items.is_empty());

    let cart = client
        .add_to_cart(
            &cart.id,
            &AddItemInput {
                product_id: "p1".to_string(),
                product_name: "Widget".to_string(),
                quantity: 2,
                price: 10.0,
            },
        )
        .await
        .unwrap();
    assert_eq!(cart.subtotal, 20.0);

    let cart = client
        .add_to_cart(
            &cart.id,
            &AddItemInput {
                product_id: "p1".to_string(),
                product_name: "Widget".to_string(),
                quantity: 3,
                price: 10.0,
            },
        )
        .await
        .unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 5);
    assert_eq!(cart.subtotal, 50.0);

    let by_account = client.carts_by_account("acct-1").await.unwrap();
    assert_eq!(by_account.data.len(), 1);

    let cart = client
        .remove_from_cart(
            &cart.id,
            &RemoveItemInput {
                product_id: "p1".to_string(),
            },
        )
        .await
        .unwrap();
    assert!(cart.items.is_empty());
    assert_eq!(cart.subtotal, 0.0);

    client.delete_cart(&cart.id).await.unwrap();
    let err = client.get_cart(&cart.id).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 404, .. }));
}

#[tokio::test]
async fn invalid_cart_item_surfaces_as_api_error() {
    let client = client().await;
    let cart = client.create_cart(&CreateCartInput::default()).await.unwrap();

    let err = client
        .add_to_cart(
            &cart.id,
            &AddItemInput {
                product_id: "p1".to_string(),
                product_name: "Widget".to_string(),
                quantity: 0,
                price: 10.0,
            },
        )
        .await
        .unwrap_err();

    match err {
        ClientError::Api { status, body } => {
            assert_eq!(status, 400);
            assert!(body["error"].as_str().unwrap().contains("quantity"));
        }
        other => panic!("expected Api error, got: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Network errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    // Bind then immediately drop a listener so the port is known-closed
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = SalescartClient::new(ClientConfig {
        base_url: format!("http://{addr}"),
        api_key: None,
        timeout: Some(Duration::from_secs(1)),
    })
    .unwrap();

    let err = client.get_account("any").await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)), "got: {err}");
}

//! Cart persistence and the item merge operations
//!
//! `add_item` and `remove_item` are plain read-modify-write sequences with
//! no transaction and no version token: two concurrent writers against the
//! same cart id can both read the same prior state and the second write
//! wins. This lost-update hazard is part of the documented contract.

use anyhow::Result;
use std::sync::Arc;

use crate::model::{AddItemInput, Cart, CreateCartInput, RemoveItemInput};
use crate::storage::{Backend, Collection};

const COLLECTION_NAME: &str = "salesforce_carts";

/// CRUD and item operations for the carts collection.
#[derive(Clone)]
pub struct CartRepository {
    collection: Arc<dyn Collection<Cart>>,
}

impl CartRepository {
    /// Bind the repository to the configured backend.
    pub fn new(backend: &Backend) -> Self {
        Self {
            collection: backend.collection(COLLECTION_NAME),
        }
    }

    /// Create an empty cart with a fresh id and current timestamps.
    pub async fn create(&self, input: CreateCartInput) -> Result<Cart> {
        let cart = Cart::new(input);
        self.collection.insert(&cart.id, &cart).await?;
        Ok(cart)
    }

    /// Fetch a cart by id, `None` when absent.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Cart>> {
        self.collection.find_by_id(id).await
    }

    /// All carts referencing the given account id.
    pub async fn find_by_account_id(&self, account_id: &str) -> Result<Vec<Cart>> {
        self.collection.find_by_field("accountId", account_id).await
    }

    /// List a page of carts.
    pub async fn find_all(&self, limit: usize, offset: usize) -> Result<Vec<Cart>> {
        self.collection.list(limit, offset).await
    }

    /// Merge an item into the cart (see [`Cart::apply_add`]) and persist
    /// the full item list, subtotal and refreshed `updatedAt`.
    ///
    /// Returns `None` when the cart id does not exist — the only error
    /// condition of this operation.
    pub async fn add_item(&self, cart_id: &str, input: &AddItemInput) -> Result<Option<Cart>> {
        let Some(mut cart) = self.collection.find_by_id(cart_id).await? else {
            return Ok(None);
        };

        cart.apply_add(input);
        cart.touch();
        self.collection.replace(cart_id, &cart).await?;
        Ok(Some(cart))
    }

    /// Remove a line from the cart and persist.
    ///
    /// Removing a productId that is not in the cart is a silent no-op on
    /// content, but the cart is still re-persisted and `updatedAt` bumped.
    /// Returns `None` only when the cart id does not exist.
    pub async fn remove_item(
        &self,
        cart_id: &str,
        input: &RemoveItemInput,
    ) -> Result<Option<Cart>> {
        let Some(mut cart) = self.collection.find_by_id(cart_id).await? else {
            return Ok(None);
        };

        cart.apply_remove(&input.product_id);
        cart.touch();
        self.collection.replace(cart_id, &cart).await?;
        Ok(Some(cart))
    }

    /// Hard-delete a cart. `false` when the id is unknown.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        self.collection.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    fn repo() -> CartRepository {
        CartRepository::new(&Backend::Memory(InMemoryStore::new()))
    }

    fn add_input(product_id: &str, quantity: i64, price: f64) -> AddItemInput {
        AddItemInput {
            product_id: product_id.to_string(),
            product_name: format!("Product {product_id}"),
            quantity,
            price,
        }
    }

    #[tokio::test]
    async fn test_add_item_persists_merge_and_subtotal() {
        let repo = repo();
        let cart = repo.create(CreateCartInput::default()).await.unwrap();

        repo.add_item(&cart.id, &add_input("p1", 2, 10.0))
            .await
            .unwrap()
            .unwrap();
        let merged = repo
            .add_item(&cart.id, &add_input("p1", 3, 10.0))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(merged.items.len(), 1);
        assert_eq!(merged.items[0].quantity, 5);
        assert_eq!(merged.subtotal, 50.0);

        // The persisted state matches what was returned
        let stored = repo.find_by_id(&cart.id).await.unwrap().unwrap();
        assert_eq!(stored.items, merged.items);
        assert_eq!(stored.subtotal, merged.subtotal);
    }

    #[tokio::test]
    async fn test_add_item_unknown_cart_is_none() {
        let repo = repo();
        let result = repo
            .add_item("missing", &add_input("p1", 1, 1.0))
            .await
            .unwrap();
        assert!(result.is_none());

        // The failed add must not have created a cart
        assert!(repo.find_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_unknown_product_still_bumps_updated_at() {
        let repo = repo();
        let cart = repo.create(CreateCartInput::default()).await.unwrap();
        repo.add_item(&cart.id, &add_input("p1", 1, 5.0))
            .await
            .unwrap();
        let before = repo.find_by_id(&cart.id).await.unwrap().unwrap();

        let after = repo
            .remove_item(
                &cart.id,
                &RemoveItemInput {
                    product_id: "absent".to_string(),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(after.items, before.items);
        assert_eq!(after.subtotal, before.subtotal);
        assert!(after.updated_at >= before.updated_at);
    }

    #[tokio::test]
    async fn test_remove_item_unknown_cart_is_none() {
        let repo = repo();
        let result = repo
            .remove_item(
                "missing",
                &RemoveItemInput {
                    product_id: "p1".to_string(),
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_filter_by_account_id() {
        let repo = repo();
        repo.create(CreateCartInput {
            account_id: Some("acct-1".to_string()),
        })
        .await
        .unwrap();
        repo.create(CreateCartInput::default()).await.unwrap();

        let matched = repo.find_by_account_id("acct-1").await.unwrap();
        assert_eq!(matched.len(), 1);
    }
}

//! Shopping cart aggregate
//!
//! The cart is the one entity with a real consistency contract: after every
//! mutation, `subtotal` equals the sum of all item totals and each item's
//! `total` equals `quantity × price`, and no two items share a `productId`.
//! Both mutations recompute the subtotal from scratch rather than adjusting
//! it incrementally, so the invariant is re-derived on every write and never
//! drifts across repeated updates.
//!
//! Merge semantics: adding an item whose `productId` is already present adds
//! the quantities and re-prices the whole line with the incoming price
//! (last-write-wins). A caller sending a different price for the same
//! product silently re-prices every previously added unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One line in a cart. `product_id` is unique within the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub price: f64,
    /// Derived: always `quantity × price`
    pub total: f64,
}

/// A shopping cart, optionally attached to an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    pub items: Vec<CartItem>,
    /// Derived: always the sum of all item totals
    pub subtotal: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a cart. Carts start empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCartInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

/// Payload for adding an item to a cart.
///
/// Quantity must be a positive integer and price non-negative; violations
/// are rejected at the HTTP boundary with a validation error.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddItemInput {
    pub product_id: String,
    pub product_name: String,
    #[validate(range(min = 1))]
    pub quantity: i64,
    #[validate(range(min = 0.0))]
    pub price: f64,
}

/// Payload for removing a line from a cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemInput {
    pub product_id: String,
}

impl Cart {
    /// Build a fresh, empty cart with a generated id and current timestamps.
    pub fn new(input: CreateCartInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            account_id: input.account_id,
            items: Vec::new(),
            subtotal: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge an item into the cart and recompute the subtotal.
    ///
    /// If a line with the same `product_id` exists, its quantity grows by
    /// `input.quantity` and its price is overwritten with `input.price`
    /// (the stored product name is kept). Otherwise a new line is appended.
    pub fn apply_add(&mut self, input: &AddItemInput) {
        match self
            .items
            .iter_mut()
            .find(|item| item.product_id == input.product_id)
        {
            Some(item) => {
                item.quantity += input.quantity;
                item.price = input.price;
                item.total = item.quantity as f64 * item.price;
            }
            None => {
                self.items.push(CartItem {
                    product_id: input.product_id.clone(),
                    product_name: input.product_name.clone(),
                    quantity: input.quantity,
                    price: input.price,
                    total: input.quantity as f64 * input.price,
                });
            }
        }
        self.recompute_subtotal();
    }

    /// Drop every line matching `product_id` (at most one, given the
    /// uniqueness invariant) and recompute the subtotal.
    ///
    /// Removing an absent product is a silent no-op on content; the caller
    /// still re-persists the cart and bumps `updated_at`.
    pub fn apply_remove(&mut self, product_id: &str) {
        self.items.retain(|item| item.product_id != product_id);
        self.recompute_subtotal();
    }

    /// Bump the modification timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn recompute_subtotal(&mut self) {
        self.subtotal = self.items.iter().map(|item| item.total).sum();
    }
}

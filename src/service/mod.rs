//! Stateless service facade over the entity repositories
//!
//! `CrmService` adds no logic of its own: every method forwards to the
//! matching repository. It exists so HTTP handlers depend on one explicitly
//! constructed object (injected through the router state) instead of
//! reaching for process-wide singletons.

use anyhow::Result;

use crate::model::{
    Account, AddItemInput, Cart, Contact, CreateAccountInput, CreateCartInput, CreateContactInput,
    RemoveItemInput, UpdateAccountInput, UpdateContactInput,
};
use crate::repo::{AccountRepository, CartRepository, ContactRepository};
use crate::storage::Backend;

/// Facade over account, contact and cart persistence.
#[derive(Clone)]
pub struct CrmService {
    accounts: AccountRepository,
    contacts: ContactRepository,
    carts: CartRepository,
}

impl CrmService {
    /// Construct the service with repositories bound to the given backend.
    pub fn new(backend: &Backend) -> Self {
        Self {
            accounts: AccountRepository::new(backend),
            contacts: ContactRepository::new(backend),
            carts: CartRepository::new(backend),
        }
    }

    // -- Account operations --------------------------------------------------

    pub async fn create_account(&self, input: CreateAccountInput) -> Result<Account> {
        self.accounts.create(input).await
    }

    pub async fn get_account(&self, id: &str) -> Result<Option<Account>> {
        self.accounts.find_by_id(id).await
    }

    pub async fn list_accounts(&self, limit: usize, offset: usize) -> Result<Vec<Account>> {
        self.accounts.find_all(limit, offset).await
    }

    pub async fn update_account(
        &self,
        id: &str,
        input: UpdateAccountInput,
    ) -> Result<Option<Account>> {
        self.accounts.update(id, input).await
    }

    pub async fn delete_account(&self, id: &str) -> Result<bool> {
        self.accounts.delete(id).await
    }

    // -- Contact operations --------------------------------------------------

    pub async fn create_contact(&self, input: CreateContactInput) -> Result<Contact> {
        self.contacts.create(input).await
    }

    pub async fn get_contact(&self, id: &str) -> Result<Option<Contact>> {
        self.contacts.find_by_id(id).await
    }

    pub async fn list_contacts(&self, limit: usize, offset: usize) -> Result<Vec<Contact>> {
        self.contacts.find_all(limit, offset).await
    }

    pub async fn contacts_by_account(&self, account_id: &str) -> Result<Vec<Contact>> {
        self.contacts.find_by_account_id(account_id).await
    }

    pub async fn update_contact(
        &self,
        id: &str,
        input: UpdateContactInput,
    ) -> Result<Option<Contact>> {
        self.contacts.update(id, input).await
    }

    pub async fn delete_contact(&self, id: &str) -> Result<bool> {
        self.contacts.delete(id).await
    }

    // -- Cart operations -----------------------------------------------------

    pub async fn create_cart(&self, input: CreateCartInput) -> Result<Cart> {
        self.carts.create(input).await
    }

    pub async fn get_cart(&self, id: &str) -> Result<Option<Cart>> {
        self.carts.find_by_id(id).await
    }

    pub async fn list_carts(&self, limit: usize, offset: usize) -> Result<Vec<Cart>> {
        self.carts.find_all(limit, offset).await
    }

    pub async fn carts_by_account(&self, account_id: &str) -> Result<Vec<Cart>> {
        self.carts.find_by_account_id(account_id).await
    }

    pub async fn add_to_cart(&self, cart_id: &str, input: &AddItemInput) -> Result<Option<Cart>> {
        self.carts.add_item(cart_id, input).await
    }

    pub async fn remove_from_cart(
        &self,
        cart_id: &str,
        input: &RemoveItemInput,
    ) -> Result<Option<Cart>> {
        self.carts.remove_item(cart_id, input).await
    }

    pub async fn delete_cart(&self, id: &str) -> Result<bool> {
        self.carts.delete(id).await
    }
}

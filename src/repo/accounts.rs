//! Account persistence

use anyhow::Result;
use std::sync::Arc;

use crate::model::{Account, CreateAccountInput, UpdateAccountInput};
use crate::storage::{Backend, Collection};

const COLLECTION_NAME: &str = "salesforce_accounts";

/// CRUD access to the accounts collection.
#[derive(Clone)]
pub struct AccountRepository {
    collection: Arc<dyn Collection<Account>>,
}

impl AccountRepository {
    /// Bind the repository to the configured backend.
    pub fn new(backend: &Backend) -> Self {
        Self {
            collection: backend.collection(COLLECTION_NAME),
        }
    }

    /// Create an account with a fresh id and current timestamps.
    pub async fn create(&self, input: CreateAccountInput) -> Result<Account> {
        let account = Account::new(input);
        self.collection.insert(&account.id, &account).await?;
        Ok(account)
    }

    /// Fetch an account by id, `None` when absent.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Account>> {
        self.collection.find_by_id(id).await
    }

    /// List a page of accounts.
    pub async fn find_all(&self, limit: usize, offset: usize) -> Result<Vec<Account>> {
        self.collection.list(limit, offset).await
    }

    /// Merge the provided fields over an existing account.
    ///
    /// Returns `None` when the id is unknown.
    pub async fn update(&self, id: &str, input: UpdateAccountInput) -> Result<Option<Account>> {
        let Some(mut account) = self.collection.find_by_id(id).await? else {
            return Ok(None);
        };

        account.apply_update(input);
        self.collection.replace(id, &account).await?;
        Ok(Some(account))
    }

    /// Hard-delete an account. `false` when the id is unknown.
    ///
    /// Deliberately non-cascading: contacts and carts referencing the
    /// account keep their dangling `accountId`.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        self.collection.delete(id).await
    }
}

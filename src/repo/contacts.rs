//! Contact persistence

use anyhow::Result;
use std::sync::Arc;

use crate::model::{Contact, CreateContactInput, UpdateContactInput};
use crate::storage::{Backend, Collection};

const COLLECTION_NAME: &str = "salesforce_contacts";

/// CRUD access to the contacts collection.
#[derive(Clone)]
pub struct ContactRepository {
    collection: Arc<dyn Collection<Contact>>,
}

impl ContactRepository {
    /// Bind the repository to the configured backend.
    pub fn new(backend: &Backend) -> Self {
        Self {
            collection: backend.collection(COLLECTION_NAME),
        }
    }

    /// Create a contact with a fresh id and current timestamps.
    pub async fn create(&self, input: CreateContactInput) -> Result<Contact> {
        let contact = Contact::new(input);
        self.collection.insert(&contact.id, &contact).await?;
        Ok(contact)
    }

    /// Fetch a contact by id, `None` when absent.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Contact>> {
        self.collection.find_by_id(id).await
    }

    /// All contacts referencing the given account id.
    ///
    /// The reference is soft: this may return contacts pointing at an
    /// account that no longer exists.
    pub async fn find_by_account_id(&self, account_id: &str) -> Result<Vec<Contact>> {
        self.collection.find_by_field("accountId", account_id).await
    }

    /// List a page of contacts.
    pub async fn find_all(&self, limit: usize, offset: usize) -> Result<Vec<Contact>> {
        self.collection.list(limit, offset).await
    }

    /// Merge the provided fields over an existing contact.
    ///
    /// Returns `None` when the id is unknown.
    pub async fn update(&self, id: &str, input: UpdateContactInput) -> Result<Option<Contact>> {
        let Some(mut contact) = self.collection.find_by_id(id).await? else {
            return Ok(None);
        };

        contact.apply_update(input);
        self.collection.replace(id, &contact).await?;
        Ok(Some(contact))
    }

    /// Hard-delete a contact. `false` when the id is unknown.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        self.collection.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    fn repo() -> ContactRepository {
        ContactRepository::new(&Backend::Memory(InMemoryStore::new()))
    }

    fn create_input(first: &str, account_id: Option<&str>) -> CreateContactInput {
        CreateContactInput {
            account_id: account_id.map(String::from),
            first_name: first.to_string(),
            last_name: "Tester".to_string(),
            email: None,
            phone: None,
            title: None,
            department: None,
        }
    }

    #[tokio::test]
    async fn test_filter_by_account_id() {
        let repo = repo();
        repo.create(create_input("Ada", Some("acct-1"))).await.unwrap();
        repo.create(create_input("Grace", Some("acct-1")))
            .await
            .unwrap();
        repo.create(create_input("Alan", Some("acct-2"))).await.unwrap();
        repo.create(create_input("Edsger", None)).await.unwrap();

        let matched = repo.find_by_account_id("acct-1").await.unwrap();
        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|c| c.account_id.as_deref() == Some("acct-1")));
    }

    #[tokio::test]
    async fn test_contacts_survive_account_deletion() {
        // No cascade: the account repository knows nothing about contacts,
        // so a dangling accountId is expected and allowed.
        let repo = repo();
        let contact = repo.create(create_input("Ada", Some("gone"))).await.unwrap();

        let found = repo.find_by_id(&contact.id).await.unwrap().unwrap();
        assert_eq!(found.account_id.as_deref(), Some("gone"));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = repo();
        let contact = repo.create(create_input("Ada", None)).await.unwrap();

        let updated = repo
            .update(
                &contact.id,
                UpdateContactInput {
                    email: Some("ada@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.email.as_deref(), Some("ada@example.com"));

        assert!(repo.delete(&contact.id).await.unwrap());
        assert!(repo.find_by_id(&contact.id).await.unwrap().is_none());
    }
}

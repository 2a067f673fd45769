//! User persistence backing the auth endpoints

use anyhow::Result;
use std::sync::Arc;

use crate::model::{RegisterInput, User};
use crate::storage::{Backend, Collection};

const COLLECTION_NAME: &str = "users";

/// Access to the users collection.
///
/// Email is looked up with a field filter; uniqueness is enforced by the
/// registration handler (check-then-insert), not by the storage layer.
#[derive(Clone)]
pub struct UserRepository {
    collection: Arc<dyn Collection<User>>,
}

impl UserRepository {
    /// Bind the repository to the configured backend.
    pub fn new(backend: &Backend) -> Self {
        Self {
            collection: backend.collection(COLLECTION_NAME),
        }
    }

    /// Store a new user with a fresh id and current timestamp.
    pub async fn create(&self, input: RegisterInput) -> Result<User> {
        let user = User::new(input);
        self.collection.insert(&user.id, &user).await?;
        Ok(user)
    }

    /// First user with the given email, `None` when absent.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let matched = self.collection.find_by_field("email", email).await?;
        Ok(matched.into_iter().next())
    }
}

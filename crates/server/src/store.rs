//! User persistence.
//!
//! Users are keyed by their API key, which is also how authenticated
//! requests find them.

use crate::user::User;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors from a [`UserStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// A user with this API key already exists.
    #[error("api key already in use")]
    DuplicateKey,

    /// The backing store failed.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Storage for user records.
pub trait UserStore: Send + Sync + 'static {
    /// Insert a new user. Fails if the API key is already taken.
    fn create_user(&self, user: User) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Look up a user by API key.
    fn get_user(
        &self,
        api_key: &str,
    ) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;
}

/// In-process [`UserStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for MemoryStore {
    async fn create_user(&self, user: User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.api_key) {
            return Err(StoreError::DuplicateKey);
        }
        users.insert(user.api_key.clone(), user);
        Ok(())
    }

    async fn get_user(&self, api_key: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(api_key).cloned())
    }
}

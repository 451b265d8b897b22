use async_trait::async_trait;

use crate::domain::errors::RepositoryError;

/// String-keyed persistent storage, the server-side counterpart of browser local storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError>;
    async fn set(&self, key: &str, value: String) -> Result<(), RepositoryError>;
}

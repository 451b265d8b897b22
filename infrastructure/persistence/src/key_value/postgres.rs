use async_trait::async_trait;
use sqlx::PgPool;

use business::domain::errors::RepositoryError;
use business::domain::storage::KeyValueStore;

use super::entity::KeyValueEntity;

pub struct PostgresKeyValueStore {
    pool: PgPool,
}

impl PostgresKeyValueStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for PostgresKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let entity = sqlx::query_as::<_, KeyValueEntity>(
            "SELECT key, value, updated_at FROM key_value_store WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Reading key {} failed: {}", key, e);
            RepositoryError::persistence()
        })?;

        Ok(entity.map(|e| e.value))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO key_value_store (key, value, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key) DO UPDATE SET
                value = EXCLUDED.value,
                updated_at = EXCLUDED.updated_at"#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Writing key {} failed: {}", key, e);
            RepositoryError::persistence()
        })?;

        Ok(())
    }
}

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use business::domain::storage::KeyValueStore;
use persistence::db::{DatabaseConfig, create_postgres_pool, run_migrations};
use persistence::key_value::file::FileKeyValueStore;
use persistence::key_value::memory::InMemoryKeyValueStore;
use persistence::key_value::postgres::PostgresKeyValueStore;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StorageConfigError {
    #[error("CART_STORAGE must be one of memory, file, postgres (got {0})")]
    UnknownBackend(String),
    #[error("DATABASE_URL must be set when CART_STORAGE=postgres")]
    MissingDatabaseUrl,
}

/// Backend holding the persisted cart.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageConfig {
    Memory,
    File {
        path: PathBuf,
    },
    Postgres {
        database_url: String,
        migrations_path: String,
    },
}

impl StorageConfig {
    /// Environment variables:
    /// - CART_STORAGE: "memory", "file" or "postgres" (default: "file")
    /// - CART_STORAGE_PATH: JSON file for the file backend (default: "./data/cart.json")
    /// - DATABASE_URL: PostgreSQL connection string (required for postgres)
    /// - MIGRATIONS_PATH: Migrations directory (default: "./infrastructure/persistence/migrations")
    pub fn from_env() -> Result<Self, StorageConfigError> {
        Self::parse(
            env::var("CART_STORAGE").ok(),
            env::var("CART_STORAGE_PATH").ok(),
            env::var("DATABASE_URL").ok(),
            env::var("MIGRATIONS_PATH").ok(),
        )
    }

    fn parse(
        backend: Option<String>,
        path: Option<String>,
        database_url: Option<String>,
        migrations_path: Option<String>,
    ) -> Result<Self, StorageConfigError> {
        let backend = backend.unwrap_or_else(|| "file".to_string());
        match backend.trim().to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File {
                path: PathBuf::from(path.unwrap_or_else(|| "./data/cart.json".to_string())),
            }),
            "postgres" => Ok(Self::Postgres {
                database_url: database_url.ok_or(StorageConfigError::MissingDatabaseUrl)?,
                migrations_path: migrations_path
                    .unwrap_or_else(|| "./infrastructure/persistence/migrations".to_string()),
            }),
            _ => Err(StorageConfigError::UnknownBackend(backend)),
        }
    }
}

/// Builds the configured key-value store, connecting and migrating when needed.
pub async fn init_storage(config: &StorageConfig) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config {
        StorageConfig::Memory => {
            tracing::warn!("Cart storage is in memory; the cart is lost on restart");
            Arc::new(InMemoryKeyValueStore::new())
        }
        StorageConfig::File { path } => {
            tracing::info!("Cart storage file: {}", path.display());
            Arc::new(FileKeyValueStore::open(path.clone()).await?)
        }
        StorageConfig::Postgres {
            database_url,
            migrations_path,
        } => {
            let pool = create_postgres_pool(&DatabaseConfig::new(database_url.clone())).await?;
            run_migrations(&pool, migrations_path).await?;
            Arc::new(PostgresKeyValueStore::new(pool))
        }
    };
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_file_backend() {
        let config = StorageConfig::parse(None, None, None, None).unwrap();

        assert_eq!(
            config,
            StorageConfig::File {
                path: PathBuf::from("./data/cart.json")
            }
        );
    }

    #[test]
    fn should_require_database_url_for_postgres() {
        let result = StorageConfig::parse(Some("postgres".to_string()), None, None, None);

        assert_eq!(result, Err(StorageConfigError::MissingDatabaseUrl));
    }

    #[test]
    fn should_accept_backend_name_case_insensitively() {
        let config = StorageConfig::parse(Some("Memory".to_string()), None, None, None).unwrap();

        assert_eq!(config, StorageConfig::Memory);
    }

    #[test]
    fn should_reject_unknown_backend() {
        let result = StorageConfig::parse(Some("redis".to_string()), None, None, None);

        assert!(matches!(result, Err(StorageConfigError::UnknownBackend(_))));
    }
}

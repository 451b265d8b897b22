use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::{fs, sync::RwLock};

use business::domain::errors::RepositoryError;
use business::domain::storage::KeyValueStore;

/// JSON-file backed key-value store.
///
/// The whole map lives in memory and is rewritten to disk on every `set`,
/// through a sibling temp file so a crash never leaves a half-written file.
pub struct FileKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
    file_path: PathBuf,
}

impl FileKeyValueStore {
    /// Opens the store at `path`. A missing file means an empty store;
    /// an unreadable one is logged and treated as empty too.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, RepositoryError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .await
                .map_err(|_| RepositoryError::persistence())?;
        }

        let entries = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable store {}: {}", file_path.display(), e);
                HashMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                tracing::error!("Could not read store {}: {}", file_path.display(), e);
                return Err(RepositoryError::persistence());
            }
        };

        Ok(Self {
            entries: RwLock::new(entries),
            file_path,
        })
    }

    async fn flush(&self, entries: &HashMap<String, String>) -> Result<(), RepositoryError> {
        let data = serde_json::to_vec_pretty(entries).map_err(|_| RepositoryError::persistence())?;
        let tmp_path = self.file_path.with_extension("tmp");
        fs::write(&tmp_path, data)
            .await
            .map_err(|_| RepositoryError::persistence())?;
        fs::rename(&tmp_path, &self.file_path)
            .await
            .map_err(|_| RepositoryError::persistence())
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), RepositoryError> {
        let mut entries = self.entries.write().await;
        let previous = entries.insert(key.to_string(), value);
        if let Err(e) = self.flush(&entries).await {
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            tracing::error!("Could not write store {}", self.file_path.display());
            return Err(e);
        }
        Ok(())
    }
}

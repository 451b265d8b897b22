use std::collections::HashMap;
use std::sync::{Arc, PoisonError};

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::cart::model::Cart;
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::shared::value_objects::ProductId;
use crate::domain::storage::KeyValueStore;

/// Storage key under which the serialized cart lives.
pub const CART_STORAGE_KEY: &str = "@storefront:cart";

/// Owner of the session cart and its persisted mirror.
///
/// Mutations go through [`CartStore::commit`], which writes the new cart to
/// storage before replacing the in-memory copy, so both stay identical.
/// Callers doing read-fetch-modify-write on one product hold the guard from
/// [`CartStore::lock_product`] for the whole operation.
pub struct CartStore {
    cart: Mutex<Cart>,
    product_locks: std::sync::Mutex<HashMap<ProductId, Arc<Mutex<()>>>>,
    storage: Arc<dyn KeyValueStore>,
    logger: Arc<dyn Logger>,
}

impl CartStore {
    /// Restores the cart from storage, starting empty when nothing usable is stored.
    pub async fn load(storage: Arc<dyn KeyValueStore>, logger: Arc<dyn Logger>) -> Self {
        let cart = match storage.get(CART_STORAGE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Cart>(&raw) {
                Ok(cart) => {
                    logger.info(&format!("Restored cart with {} products", cart.len()));
                    cart
                }
                Err(e) => {
                    logger.warn(&format!("Discarding unreadable stored cart: {}", e));
                    Cart::new()
                }
            },
            Ok(None) => {
                logger.debug("No stored cart, starting empty");
                Cart::new()
            }
            Err(e) => {
                logger.warn(&format!("Could not read stored cart: {}", e));
                Cart::new()
            }
        };

        Self::with_cart(cart, storage, logger)
    }

    pub fn with_cart(cart: Cart, storage: Arc<dyn KeyValueStore>, logger: Arc<dyn Logger>) -> Self {
        Self {
            cart: Mutex::new(cart),
            product_locks: std::sync::Mutex::new(HashMap::new()),
            storage,
            logger,
        }
    }

    pub async fn snapshot(&self) -> Cart {
        self.cart.lock().await.clone()
    }

    /// Waits for exclusive access to one product's cart line.
    pub async fn lock_product(&self, product_id: ProductId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self
                .product_locks
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            // Entries referenced only by the map are idle.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(product_id).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Applies `mutate` to the current cart and persists the result.
    ///
    /// `mutate` returns whether it changed anything; unchanged carts are not
    /// written. On a storage failure the in-memory cart is left as it was.
    pub async fn commit<F>(&self, mutate: F) -> Result<Cart, RepositoryError>
    where
        F: FnOnce(&mut Cart) -> bool,
    {
        let mut current = self.cart.lock().await;
        let mut next = current.clone();
        if !mutate(&mut next) {
            return Ok(next);
        }

        let raw = serde_json::to_string(&next).map_err(|_| RepositoryError::persistence())?;
        self.storage.set(CART_STORAGE_KEY, raw).await?;
        self.logger
            .debug(&format!("Persisted cart with {} products", next.len()));

        *current = next.clone();
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::cart::test_support::{
        MockStorage, cart_json, mock_logger, product, recording_storage,
    };

    #[tokio::test]
    async fn should_restore_stored_cart_in_order() {
        let (storage, _writes) = recording_storage(Some(cart_json(&[product(3, 1), product(1, 2)])));

        let store = CartStore::load(storage, mock_logger()).await;

        let ids: Vec<i64> = store.snapshot().await.iter().map(|p| p.id.value()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[tokio::test]
    async fn should_start_empty_when_nothing_stored() {
        let (storage, _writes) = recording_storage(None);

        let store = CartStore::load(storage, mock_logger()).await;

        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn should_start_empty_when_stored_cart_is_corrupt() {
        let (storage, _writes) = recording_storage(Some("{not json".to_string()));

        let store = CartStore::load(storage, mock_logger()).await;

        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn should_start_empty_when_storage_unreadable() {
        let mut storage = MockStorage::new();
        storage
            .expect_get()
            .returning(|_| Err(RepositoryError::Persistence));

        let store = CartStore::load(Arc::new(storage), mock_logger()).await;

        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn should_persist_committed_cart_under_fixed_key() {
        let (storage, writes) = recording_storage(None);
        let store = CartStore::load(storage, mock_logger()).await;

        let cart = store
            .commit(|cart| cart.push_new(product(5, 1)).is_ok())
            .await
            .unwrap();

        let writes = writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, CART_STORAGE_KEY);
        assert_eq!(serde_json::from_str::<Cart>(&writes[0].1).unwrap(), cart);
    }

    #[tokio::test]
    async fn should_skip_write_when_mutation_changes_nothing() {
        let (storage, writes) = recording_storage(None);
        let store = CartStore::load(storage, mock_logger()).await;

        let cart = store.commit(|_| false).await.unwrap();

        assert!(cart.is_empty());
        assert!(writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_keep_memory_unchanged_when_write_fails() {
        let mut storage = MockStorage::new();
        storage.expect_get().returning(|_| Ok(None));
        storage
            .expect_set()
            .returning(|_, _| Err(RepositoryError::Persistence));
        let store = CartStore::load(Arc::new(storage), mock_logger()).await;

        let result = store.commit(|cart| cart.push_new(product(5, 1)).is_ok()).await;

        assert_eq!(result, Err(RepositoryError::Persistence));
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn should_reuse_and_release_product_locks() {
        let (storage, _writes) = recording_storage(None);
        let store = CartStore::load(storage, mock_logger()).await;

        let guard = store.lock_product(ProductId::new(1)).await;
        let other = store.lock_product(ProductId::new(2)).await;
        drop(guard);
        drop(other);
        let again = store.lock_product(ProductId::new(1)).await;

        drop(again);
    }
}

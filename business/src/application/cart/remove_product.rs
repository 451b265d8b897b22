use std::sync::Arc;

use async_trait::async_trait;

use crate::application::cart::store::CartStore;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;
use crate::domain::cart::use_cases::remove_product::{RemoveProductParams, RemoveProductUseCase};
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;

pub struct RemoveProductUseCaseImpl {
    pub store: Arc<CartStore>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RemoveProductUseCase for RemoveProductUseCaseImpl {
    async fn execute(&self, params: RemoveProductParams) -> Result<Cart, CartError> {
        let product_id = params.product_id;
        self.logger
            .info(&format!("Removing product {} from cart", product_id));

        let _guard = self.store.lock_product(product_id).await;

        if !self.store.snapshot().await.contains(product_id) {
            self.logger
                .warn(&format!("Product {} is not in the cart", product_id));
            return Err(CartError::RemoveFailed(RepositoryError::NotFound));
        }

        let cart = self
            .store
            .commit(|cart| cart.remove(product_id).is_some())
            .await
            .map_err(|e| {
                self.logger
                    .error(&format!("Removing product {} failed: {}", product_id, e));
                CartError::RemoveFailed(e)
            })?;

        self.logger
            .info(&format!("Removed product {} from cart", product_id));
        Ok(cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::cart::test_support::{cart_json, mock_logger, product, recording_storage};
    use crate::domain::shared::value_objects::ProductId;

    async fn use_case_with(
        initial: &[crate::domain::cart::model::Product],
    ) -> (
        RemoveProductUseCaseImpl,
        crate::application::cart::test_support::Writes,
    ) {
        let (storage, writes) = recording_storage(Some(cart_json(initial)));
        let store = Arc::new(CartStore::load(storage, mock_logger()).await);
        (
            RemoveProductUseCaseImpl {
                store,
                logger: mock_logger(),
            },
            writes,
        )
    }

    #[tokio::test]
    async fn should_remove_present_product_and_keep_order() {
        let (use_case, writes) =
            use_case_with(&[product(1, 1), product(2, 3), product(3, 1)]).await;

        let cart = use_case
            .execute(RemoveProductParams {
                product_id: ProductId::new(2),
            })
            .await
            .unwrap();

        let ids: Vec<i64> = cart.iter().map(|p| p.id.value()).collect();
        assert_eq!(ids, vec![1, 3]);
        let writes = writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].1, cart_json(&[product(1, 1), product(3, 1)]));
    }

    #[tokio::test]
    async fn should_fail_when_product_absent() {
        let (use_case, writes) = use_case_with(&[product(1, 1)]).await;

        let result = use_case
            .execute(RemoveProductParams {
                product_id: ProductId::new(7),
            })
            .await;

        assert_eq!(result, Err(CartError::RemoveFailed(RepositoryError::NotFound)));
        assert_eq!(use_case.store.snapshot().await.len(), 1);
        assert!(writes.lock().unwrap().is_empty());
    }
}

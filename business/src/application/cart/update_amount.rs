use std::sync::Arc;

use async_trait::async_trait;

use crate::application::cart::store::CartStore;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;
use crate::domain::cart::services::StockService;
use crate::domain::cart::use_cases::update_amount::{
    UpdateProductAmountParams, UpdateProductAmountUseCase,
};
use crate::domain::logger::Logger;

pub struct UpdateProductAmountUseCaseImpl {
    pub store: Arc<CartStore>,
    pub stock: Arc<dyn StockService>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateProductAmountUseCase for UpdateProductAmountUseCaseImpl {
    async fn execute(&self, params: UpdateProductAmountParams) -> Result<Cart, CartError> {
        let product_id = params.product_id;

        if params.amount <= 0 {
            self.logger.debug(&format!(
                "Ignoring non-positive amount {} for product {}",
                params.amount, product_id
            ));
            return Ok(self.store.snapshot().await);
        }

        self.logger.info(&format!(
            "Setting amount of product {} to {}",
            product_id, params.amount
        ));

        let _guard = self.store.lock_product(product_id).await;

        let stock = self.stock.get(product_id).await.map_err(|e| {
            self.logger
                .error(&format!("Stock lookup for product {} failed: {}", product_id, e));
            CartError::UpdateFailed(e)
        })?;

        let amount = match u32::try_from(params.amount) {
            Ok(amount) if amount <= stock.amount => amount,
            _ => {
                self.logger.warn(&format!(
                    "Requested {} of product {} but only {} in stock",
                    params.amount, product_id, stock.amount
                ));
                return Err(CartError::OutOfStock {
                    product_id,
                    requested: params.amount.unsigned_abs(),
                    available: stock.amount,
                });
            }
        };

        let cart = self
            .store
            .commit(|cart| cart.set_amount(product_id, amount).unwrap_or(false))
            .await
            .map_err(|e| {
                self.logger
                    .error(&format!("Updating product {} failed: {}", product_id, e));
                CartError::UpdateFailed(e)
            })?;

        Ok(cart)
    }
}

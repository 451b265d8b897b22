use std::sync::Arc;

use async_trait::async_trait;

use crate::application::cart::store::CartStore;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;
use crate::domain::cart::services::{ProductCatalog, StockService};
use crate::domain::cart::use_cases::add_product::{AddProductParams, AddProductUseCase};
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;

pub struct AddProductUseCaseImpl {
    pub store: Arc<CartStore>,
    pub stock: Arc<dyn StockService>,
    pub catalog: Arc<dyn ProductCatalog>,
    pub logger: Arc<dyn Logger>,
}

impl AddProductUseCaseImpl {
    fn failed(&self, context: &str, error: RepositoryError) -> CartError {
        self.logger
            .error(&format!("Adding product failed ({}): {}", context, error));
        CartError::AddFailed(error)
    }
}

#[async_trait]
impl AddProductUseCase for AddProductUseCaseImpl {
    async fn execute(&self, params: AddProductParams) -> Result<Cart, CartError> {
        let product_id = params.product_id;
        self.logger
            .info(&format!("Adding product {} to cart", product_id));

        let _guard = self.store.lock_product(product_id).await;
        let current = self.store.snapshot().await;

        let stock = self
            .stock
            .get(product_id)
            .await
            .map_err(|e| self.failed("stock", e))?;

        if let Some(existing) = current.find(product_id) {
            if existing.amount == stock.amount {
                self.logger.warn(&format!(
                    "Product {} already at stock limit ({})",
                    product_id, stock.amount
                ));
                return Err(CartError::OutOfStock {
                    product_id,
                    requested: u64::from(existing.amount) + 1,
                    available: stock.amount,
                });
            }

            let cart = self
                .store
                .commit(|cart| cart.increment(product_id).is_some())
                .await
                .map_err(|e| self.failed("storage", e))?;

            self.logger
                .info(&format!("Incremented product {} in cart", product_id));
            return Ok(cart);
        }

        // The stock lookup only establishes that the product is sold; a new
        // line is inserted with one unit whatever the available amount.
        let metadata = self
            .catalog
            .get(product_id)
            .await
            .map_err(|e| self.failed("catalog", e))?;
        if metadata.id != product_id {
            return Err(self.failed("catalog", RepositoryError::malformed_response()));
        }
        let line = metadata.into_cart_product();

        let cart = self
            .store
            .commit(|cart| cart.push_new(line).is_ok())
            .await
            .map_err(|e| self.failed("storage", e))?;

        self.logger
            .info(&format!("Added product {} to cart", product_id));
        Ok(cart)
    }
}

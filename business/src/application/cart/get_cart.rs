use std::sync::Arc;

use async_trait::async_trait;

use crate::application::cart::store::CartStore;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;
use crate::domain::cart::use_cases::get_cart::GetCartUseCase;
use crate::domain::logger::Logger;

pub struct GetCartUseCaseImpl {
    pub store: Arc<CartStore>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetCartUseCase for GetCartUseCaseImpl {
    async fn execute(&self) -> Result<Cart, CartError> {
        self.logger.debug("Fetching cart snapshot");

        Ok(self.store.snapshot().await)
    }
}

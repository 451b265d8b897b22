use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;
use crate::domain::shared::value_objects::ProductId;

pub struct UpdateProductAmountParams {
    pub product_id: ProductId,
    /// Desired quantity. Zero or negative values leave the cart untouched.
    pub amount: i64,
}

#[async_trait]
pub trait UpdateProductAmountUseCase: Send + Sync {
    async fn execute(&self, params: UpdateProductAmountParams) -> Result<Cart, CartError>;
}

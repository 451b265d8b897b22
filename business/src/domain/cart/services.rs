use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::ProductId;

use super::model::{CatalogProduct, StockEntry};

/// Service port reading how many units of a product are available.
#[async_trait]
pub trait StockService: Send + Sync {
    async fn get(&self, product_id: ProductId) -> Result<StockEntry, RepositoryError>;
}

/// Service port reading product metadata by id.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn get(&self, product_id: ProductId) -> Result<CatalogProduct, RepositoryError>;
}
